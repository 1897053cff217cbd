//! User profile documents.

use reindexer_shared::{LanguageLevel, UserProfile};
use reindexer_source::UserRow;

use crate::errors::PipelineError;

/// Parse a `lang|level,lang|level` list.
///
/// An empty string is an empty list. A pair without a level, or with a level
/// that is not a number in `0..=255`, is an error.
pub fn parse_language_levels(info: &str) -> Result<Vec<LanguageLevel>, PipelineError> {
    parse_pairs(info).map_err(PipelineError::processor)
}

fn parse_pairs(info: &str) -> Result<Vec<LanguageLevel>, String> {
    if info.is_empty() {
        return Ok(Vec::new());
    }

    info.split(',')
        .map(|pair| {
            let (lang, level) = pair
                .split_once('|')
                .ok_or_else(|| format!("language entry `{}` has no level", pair))?;
            let level = level
                .trim()
                .parse::<u8>()
                .map_err(|e| format!("language entry `{}`: {}", pair, e))?;

            Ok(LanguageLevel {
                lang: lang.to_string(),
                level,
            })
        })
        .collect()
}

/// Build the searchable profile of a user row.
pub fn user_profile(row: UserRow) -> Result<UserProfile, PipelineError> {
    let id = row.id;
    let known = parse_pairs(&row.known_info)
        .map_err(|e| PipelineError::processor(format!("user {}: {}", id, e)))?;
    let learn = parse_pairs(&row.learn_info)
        .map_err(|e| PipelineError::processor(format!("user {}: {}", id, e)))?;
    let age = u8::try_from(row.age).map_err(|_| {
        PipelineError::processor(format!("user {}: age {} out of range", id, row.age))
    })?;

    Ok(UserProfile {
        id,
        sex_bool: row.sex == "female",
        name: row.name,
        username: row.username,
        signup: row.signup,
        last_login: row.last_login,
        modified: row.modified,
        birth: row.birth,
        age,
        sex: row.sex,
        tz: row.tz,
        city: row.city,
        wg_id: row.wg_id,
        country: row.country,
        iso2: row.iso2,
        cont: row.cont,
        main_photo_id: row.main_photo_id,
        photo_exists: row.photo_exists,
        main_thumb: row.main_thumb,
        lfor_friend: row.lfor_friend,
        lfor_langex: row.lfor_langex,
        lfor_relation: row.lfor_relation,
        lfor_snail: row.lfor_snail,
        lfor_meet: row.lfor_meet,
        description: row.description,
        books: row.books,
        hobbies: row.hobbies,
        movies: row.movies,
        requests: row.requests,
        music: row.music,
        quotes: row.quotes,
        tv: row.tv,
        langex_desc: row.langex_desc,
        occupation: row.occupation,
        relationship: row.relationship,
        known,
        learn,
        city_name_en: row.city_name_en,
        city_id: row.city_id,
        region_id: row.region_id,
        country_code: row.country_code,
        home_city_name_en: row.home_city_name_en,
        home_city_id: row.home_city_id,
        home_region_id: row.home_region_id,
        home_country_code: row.home_country_code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_language_levels() {
        assert!(parse_language_levels("").unwrap().is_empty());

        let levels = parse_language_levels("en|5,fr|2").unwrap();
        assert_eq!(
            levels,
            vec![
                LanguageLevel {
                    lang: "en".to_string(),
                    level: 5
                },
                LanguageLevel {
                    lang: "fr".to_string(),
                    level: 2
                },
            ]
        );
    }

    #[test]
    fn test_parse_language_levels_rejects_malformed() {
        assert!(matches!(
            parse_language_levels("en"),
            Err(PipelineError::ProcessorError(_))
        ));
        assert!(matches!(
            parse_language_levels("en|fluent"),
            Err(PipelineError::ProcessorError(_))
        ));
        assert!(matches!(
            parse_language_levels("en|300"),
            Err(PipelineError::ProcessorError(_))
        ));
    }

    #[test]
    fn test_user_profile() {
        let row = UserRow {
            id: 77,
            username: "wanderer".to_string(),
            sex: "female".to_string(),
            age: 31,
            wg_id: "4812".to_string(),
            known_info: "de|5".to_string(),
            learn_info: "ja|1,ko|2".to_string(),
            ..Default::default()
        };

        let profile = user_profile(row).unwrap();

        assert_eq!(profile.id, 77);
        assert!(profile.sex_bool);
        assert_eq!(profile.age, 31);
        assert_eq!(profile.wg_id, "4812");
        assert_eq!(profile.known.len(), 1);
        assert_eq!(profile.learn[1].lang, "ko");
    }

    #[test]
    fn test_user_profile_reports_user_id() {
        let row = UserRow {
            id: 9,
            sex: "male".to_string(),
            known_info: "de|x".to_string(),
            ..Default::default()
        };

        let err = user_profile(row).unwrap_err();
        assert!(err.to_string().contains("user 9"));
    }
}
