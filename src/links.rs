//! Id extraction from share links.

use url::Url;

use crate::error::{Error, Result};

fn invalid_url() -> Error {
    Error::invalid("Invalid URL.")
}

/// `https://icodeshequ.youdao.com/work/<id>` -> `<id>`
pub fn work_id_from_url(url: &str) -> Result<String> {
    let parsed = Url::parse(url).map_err(|_| invalid_url())?;
    parsed
        .path()
        .split('/')
        .nth(2)
        .filter(|id| !id.is_empty())
        .map(str::to_owned)
        .ok_or_else(invalid_url)
}

/// `https://icodeshequ.youdao.com/person?userId=<id>` -> `<id>`
pub fn user_id_from_url(url: &str) -> Result<String> {
    url.split_once('=')
        .map(|(_, id)| id.to_owned())
        .ok_or_else(invalid_url)
}

/// Accepts either a bare work id or a share link.
pub fn work_ref(input: &str) -> Result<String> {
    if input.starts_with("http://") || input.starts_with("https://") {
        work_id_from_url(input)
    } else {
        Ok(input.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn work_id_is_second_segment() {
        assert_eq!(
            work_id_from_url("https://icodeshequ.youdao.com/work/a1f09b5eb34a48dfbdc8dee59d130ec6")
                .unwrap(),
            "a1f09b5eb34a48dfbdc8dee59d130ec6"
        );
        assert_eq!(
            work_id_from_url("https://icodeshequ.youdao.com/work/abc/?from=share").unwrap(),
            "abc"
        );
        assert!(work_id_from_url("https://icodeshequ.youdao.com/").is_err());
        assert!(work_id_from_url("not a url").is_err());
    }

    #[test]
    fn user_id_after_first_equals() {
        assert_eq!(
            user_id_from_url("https://icodeshequ.youdao.com/person?userId=u-42").unwrap(),
            "u-42"
        );
        assert!(matches!(
            user_id_from_url("https://icodeshequ.youdao.com/person"),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn work_ref_passes_plain_ids() {
        assert_eq!(work_ref("abc").unwrap(), "abc");
        assert_eq!(
            work_ref("https://icodeshequ.youdao.com/work/xyz").unwrap(),
            "xyz"
        );
    }
}
