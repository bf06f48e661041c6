use std::collections::HashSet;

use futures::future::try_join_all;
use log::info;

use crate::api::CommentTarget;
use crate::client::IcodeClient;
use crate::error::Result;

/// Page size large enough to fetch every comment in one request.
pub const INFINITY: u32 = 999_999_999;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PageSelection {
    #[default]
    All,
    Pages(Vec<u32>),
}

/// Deletes every comment on the selected pages of a work's comment list.
///
/// Each comment is deleted once even if it shows up on several pages.
/// Returns `false` if there was nothing to delete; the first failed delete
/// is returned as the error.
pub async fn clean_comments(
    api: &IcodeClient,
    work_id: &str,
    pages: &PageSelection,
    page_size: u32,
) -> Result<bool> {
    let comments = match pages {
        PageSelection::All => api.get_work_comments(work_id, 1, INFINITY).await?,
        PageSelection::Pages(pages) => {
            let lists = try_join_all(
                pages
                    .iter()
                    .map(|&page| api.get_work_comments(work_id, page, page_size)),
            )
            .await?;
            lists.into_iter().flatten().collect()
        }
    };

    // Repeated pages list the same comments again.
    let mut seen = HashSet::new();
    let ids: Vec<i64> = comments
        .iter()
        .map(|c| c.id)
        .filter(|id| seen.insert(*id))
        .collect();

    if ids.is_empty() {
        info!("No comments to delete on {work_id}");
        return Ok(false);
    }

    info!("Deleting {} comments on {work_id}", ids.len());
    try_join_all(
        ids.into_iter()
            .map(|id| api.delete_comment(CommentTarget::Comment(id))),
    )
    .await?;
    Ok(true)
}
