//! Wire shapes for the instance content API.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{PublishVersion, ShadowProfileDraft, ShadowProfileRef, Zuid};

const ROOT_PARENT_ZUID: &str = "0";
const CANONICAL_TAG_MODE: u8 = 1;
const DEFAULT_LANG_ID: u8 = 1;

/// Body of `POST /content/models/{model}/items/`.
#[derive(Debug, Serialize)]
pub(super) struct CreateItemDto<'a> {
    web: WebFieldsDto<'a>,
    meta: MetaFieldsDto<'a>,
    data: ProfileFieldsDto<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WebFieldsDto<'a> {
    meta_title: &'a str,
    meta_link_text: &'a str,
    parent_zuid: &'static str,
    canonical_tag_mode: u8,
}

#[derive(Debug, Serialize)]
struct MetaFieldsDto<'a> {
    #[serde(rename = "contentModelZUID")]
    content_model_zuid: &'a str,
    #[serde(rename = "langID")]
    lang_id: u8,
}

#[derive(Debug, Serialize)]
struct ProfileFieldsDto<'a> {
    first_name: &'a str,
    email: &'a str,
    member_locations: Option<String>,
}

impl<'a> CreateItemDto<'a> {
    pub(super) fn new(model_zuid: &'a Zuid, draft: &'a ShadowProfileDraft) -> Self {
        Self {
            web: WebFieldsDto {
                meta_title: draft.name.as_str(),
                meta_link_text: draft.name.as_str(),
                parent_zuid: ROOT_PARENT_ZUID,
                canonical_tag_mode: CANONICAL_TAG_MODE,
            },
            meta: MetaFieldsDto {
                content_model_zuid: model_zuid.as_str(),
                lang_id: DEFAULT_LANG_ID,
            },
            data: ProfileFieldsDto {
                first_name: draft.name.as_str(),
                email: draft.email.as_str(),
                member_locations: draft.locations.to_payload(),
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct CreatedItemDto {
    #[serde(default)]
    data: Option<CreatedItemDataDto>,
}

#[derive(Debug, Deserialize)]
struct CreatedItemDataDto {
    #[serde(rename = "ZUID", alias = "itemZUID", default)]
    zuid: Option<String>,
}

impl CreatedItemDto {
    pub(super) fn into_profile_ref(self, model_zuid: &Zuid) -> Result<ShadowProfileRef, String> {
        let raw = self
            .data
            .and_then(|data| data.zuid)
            .ok_or_else(|| "created item response carried no ZUID".to_owned())?;
        let item_zuid =
            Zuid::new(raw).map_err(|error| format!("created item ZUID is invalid: {error}"))?;
        Ok(ShadowProfileRef {
            model_zuid: model_zuid.clone(),
            item_zuid,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct PublishingsDto {
    #[serde(default)]
    data: Option<Vec<PublishingDto>>,
}

#[derive(Debug, Deserialize)]
struct PublishingDto {
    #[serde(rename = "ZUID")]
    zuid: String,
    #[serde(rename = "updatedAt")]
    updated_at: String,
}

impl PublishingsDto {
    pub(super) fn into_versions(self) -> Result<Vec<PublishVersion>, String> {
        self.data
            .unwrap_or_default()
            .into_iter()
            .map(|row| {
                Ok(PublishVersion {
                    zuid: Zuid::new(row.zuid)
                        .map_err(|error| format!("publishing ZUID is invalid: {error}"))?,
                    updated_at: parse_timestamp(&row.updated_at)?,
                })
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct SearchResultsDto {
    #[serde(default)]
    data: Vec<SearchHitDto>,
}

#[derive(Debug, Deserialize)]
struct SearchHitDto {
    meta: SearchHitMetaDto,
}

#[derive(Debug, Deserialize)]
struct SearchHitMetaDto {
    #[serde(rename = "ZUID")]
    zuid: String,
    #[serde(rename = "contentModelZUID", alias = "contentModelZuid")]
    content_model_zuid: String,
}

impl SearchResultsDto {
    /// Hits belonging to `model_zuid`; other models are ignored.
    pub(super) fn into_profile_refs(self, model_zuid: &Zuid) -> Result<Vec<ShadowProfileRef>, String> {
        self.data
            .into_iter()
            .filter(|hit| hit.meta.content_model_zuid == model_zuid.as_str())
            .map(|hit| {
                Ok(ShadowProfileRef {
                    model_zuid: model_zuid.clone(),
                    item_zuid: Zuid::new(hit.meta.zuid)
                        .map_err(|error| format!("search hit ZUID is invalid: {error}"))?,
                })
            })
            .collect()
    }
}

/// Accepts RFC 3339 and the content API's `YYYY-MM-DD HH:MM:SS` (UTC) form.
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|error| format!("unrecognised timestamp `{raw}`: {error}"))
}
