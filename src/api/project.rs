//! Just enough of the scratch `project.json` manifest to find its assets.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScratchProject {
    #[serde(default)]
    pub targets: Vec<Target>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Target {
    pub name: Option<String>,
    pub costumes: Vec<Asset>,
    pub sounds: Vec<Asset>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Asset {
    pub name: Option<String>,
    pub md5ext: Option<String>,
    pub data_format: Option<String>,
}

impl ScratchProject {
    pub fn from_json(code: &str) -> serde_json::Result<Self> {
        serde_json::from_str(code)
    }

    /// File names of every costume and sound, first occurrence order, no duplicates.
    pub fn asset_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        let assets = self
            .targets
            .iter()
            .flat_map(|t| t.costumes.iter().chain(t.sounds.iter()));
        for md5ext in assets.filter_map(|a| a.md5ext.as_deref()) {
            if !names.iter().any(|n| n == md5ext) {
                names.push(md5ext.to_owned());
            }
        }
        names
    }
}
