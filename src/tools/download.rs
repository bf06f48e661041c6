use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use futures::future::try_join_all;
use log::info;
use zip::CompressionMethod;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::api::ScratchProject;
use crate::client::IcodeClient;
use crate::error::{Error, Result};

/// Saves a work into `dir` and returns the written file.
///
/// Scratch works become `<title>.sb3` with every costume and sound bundled,
/// python works become `<title>.py`. Blockly works are not supported.
pub async fn download_work(
    api: &IcodeClient,
    work_id: &str,
    dir: impl AsRef<Path>,
) -> Result<PathBuf> {
    let detail = api.get_work_detail(work_id, true).await?;
    let title = file_stem(&detail.title, work_id);
    let code = detail.code.unwrap_or_default();

    match detail.code_language.as_deref() {
        Some("scratch") => {
            let project = ScratchProject::from_json(&code)?;
            let names = project.asset_names();
            info!("Fetching {} assets of '{}'", names.len(), detail.title);

            let assets = try_join_all(names.into_iter().map(|name| async move {
                let data = api.get_scratch_asset(&name).await?;
                Ok::<_, Error>((name, data))
            }))
            .await?;

            let path = dir.as_ref().join(format!("{title}.sb3"));
            let archive = package_sb3(&code, &assets)?;
            tokio::fs::write(&path, archive).await?;
            info!("Saved {}", path.display());
            Ok(path)
        }
        Some("python") => {
            let path = dir.as_ref().join(format!("{title}.py"));
            tokio::fs::write(&path, code.replace("\n\r", "\n")).await?;
            info!("Saved {}", path.display());
            Ok(path)
        }
        other => Err(Error::UnsupportedLanguage(
            other.unwrap_or("unknown").to_owned(),
        )),
    }
}

/// Packs a project manifest and its assets into an `.sb3` archive.
pub fn package_sb3(project_json: &str, assets: &[(String, Vec<u8>)]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    zip.start_file("project.json", options)?;
    zip.write_all(project_json.as_bytes())?;
    for (name, data) in assets {
        zip.start_file(name.as_str(), options)?;
        zip.write_all(data)?;
    }

    Ok(zip.finish()?.into_inner())
}

fn file_stem(title: &str, fallback: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect();
    if stem.is_empty() {
        fallback.to_owned()
    } else {
        stem
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn sb3_holds_manifest_and_assets() {
        let assets = vec![
            ("a.svg".to_owned(), b"<svg/>".to_vec()),
            ("b.wav".to_owned(), vec![0u8, 1, 2, 3]),
        ];
        let bytes = package_sb3(r#"{"targets":[]}"#, &assets).unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 3);

        let mut manifest = String::new();
        archive
            .by_name("project.json")
            .unwrap()
            .read_to_string(&mut manifest)
            .unwrap();
        assert_eq!(manifest, r#"{"targets":[]}"#);

        let mut wav = Vec::new();
        archive.by_name("b.wav").unwrap().read_to_end(&mut wav).unwrap();
        assert_eq!(wav, vec![0u8, 1, 2, 3]);
    }

    #[test]
    fn titles_become_safe_file_names() {
        assert_eq!(file_stem("a/b\\c", "id"), "a_b_c");
        assert_eq!(file_stem("  ", "id"), "id");
        assert_eq!(file_stem("Maze 2", "id"), "Maze 2");
    }
}
