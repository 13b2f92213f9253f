//! Route templates for collection endpoints.

use reqwest::Url;

use crate::errors::ApiError;

/// Placeholder replaced by the (percent-encoded) resource id.
pub const ID_PLACEHOLDER: &str = "{id}";

/// Path templates for one collection, relative to the API base URL.
///
/// The backend is not uniform: some collections take `POST /R/create` or
/// `PUT /R/update/{id}`, others use the bare collection path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Routes {
    pub list: &'static str,
    pub create: &'static str,
    pub update: &'static str,
    pub delete: &'static str,
}

impl Routes {
    /// `GET /R`, `POST /R`, `PUT /R/{id}`, `DELETE /R/{id}`.
    pub const fn plain(list: &'static str, item: &'static str) -> Self {
        Self {
            list,
            create: list,
            update: item,
            delete: item,
        }
    }
}

/// Render a template against `base`. Each template segment is appended as
/// one path segment; `{id}` is replaced by `id`.
pub fn render(base: &Url, template: &str, id: Option<&str>) -> Result<Url, ApiError> {
    let mut url = base.clone();
    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|_| ApiError::Route(format!("{} cannot be a base URL", base)))?;
        segments.pop_if_empty();
        for segment in template.split('/').filter(|s| !s.is_empty()) {
            if segment == ID_PLACEHOLDER {
                match id {
                    Some(id) if !id.is_empty() => {
                        segments.push(id);
                    }
                    _ => {
                        return Err(ApiError::Route(format!(
                            "{} requires a resource id",
                            template
                        )))
                    }
                }
            } else {
                segments.push(segment);
            }
        }
    }
    Ok(url)
}
