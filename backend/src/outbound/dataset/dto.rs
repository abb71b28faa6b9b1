//! Wire shapes for the password-gated dataset host.

use serde::Deserialize;

use crate::domain::{LocationOption, ShadowProfileRef, Zuid};

#[derive(Debug, Deserialize)]
pub(super) struct LocationOptionsDto {
    #[serde(default)]
    data: Vec<LocationOptionDto>,
}

#[derive(Debug, Deserialize)]
struct LocationOptionDto {
    value: String,
    label: String,
}

impl LocationOptionsDto {
    pub(super) fn into_options(self) -> Vec<LocationOption> {
        self.data
            .into_iter()
            .map(|row| LocationOption {
                value: row.value,
                label: row.label,
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct UsersByEmailDto {
    #[serde(default)]
    data: Option<Vec<UserByEmailDto>>,
}

#[derive(Debug, Deserialize)]
struct UserByEmailDto {
    meta: UserByEmailMetaDto,
}

#[derive(Debug, Deserialize)]
struct UserByEmailMetaDto {
    #[serde(rename = "contentModelZuid", alias = "contentModelZUID")]
    content_model_zuid: String,
    #[serde(rename = "ZUID")]
    zuid: String,
}

impl UsersByEmailDto {
    pub(super) fn into_profile_refs(self) -> Result<Vec<ShadowProfileRef>, String> {
        self.data
            .unwrap_or_default()
            .into_iter()
            .map(|row| {
                let model_zuid = Zuid::new(row.meta.content_model_zuid)
                    .map_err(|error| format!("content model ZUID is invalid: {error}"))?;
                let item_zuid = Zuid::new(row.meta.zuid)
                    .map_err(|error| format!("item ZUID is invalid: {error}"))?;
                Ok(ShadowProfileRef {
                    model_zuid,
                    item_zuid,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn decodes_location_options() {
        let dto: LocationOptionsDto = serde_json::from_value(json!({
            "data": [
                { "value": "loc-1", "label": "Downtown" },
                { "value": "loc-2", "label": "Harbour" }
            ]
        }))
        .expect("decodes");

        let options = dto.into_options();
        assert_eq!(options.len(), 2);
        assert_eq!(options[1].label, "Harbour");
    }

    #[rstest]
    fn decodes_email_matches_with_dataset_spelling() {
        let dto: UsersByEmailDto = serde_json::from_value(json!({
            "data": [{ "meta": { "contentModelZuid": "6-staff", "ZUID": "7-jane" } }]
        }))
        .expect("decodes");

        let refs = dto.into_profile_refs().expect("maps");
        assert_eq!(refs[0].model_zuid.as_str(), "6-staff");
        assert_eq!(refs[0].item_zuid.as_str(), "7-jane");
    }

    #[rstest]
    #[case(json!({}))]
    #[case(json!({ "data": null }))]
    #[case(json!({ "data": [] }))]
    fn missing_matches_decode_as_empty(#[case] body: serde_json::Value) {
        let dto: UsersByEmailDto = serde_json::from_value(body).expect("decodes");
        assert!(dto.into_profile_refs().expect("maps").is_empty());
    }
}
