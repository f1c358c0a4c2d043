use tracing::debug;

use crate::record::Record;

/// Returns the records carrying `code` in any flag field.
///
/// Matching is a case-sensitive substring test against the raw field text.
/// A record is emitted once per flag field that matches, so a record tagged
/// `Nuclear` in two fields appears twice. Downstream year counts and exports
/// reflect that weighting.
pub fn filter_by_code<'a, I>(records: I, code: &str) -> Vec<&'a Record>
where
    I: IntoIterator<Item = &'a Record>,
{
    let out: Vec<&Record> = records
        .into_iter()
        .flat_map(|record| {
            record
                .flags()
                .into_iter()
                .filter(move |flags| flags.contains(code))
                .map(move |_| record)
        })
        .collect();

    debug!(code, matches = out.len(), "Code filter applied");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flagged(id: &str, location: &str, craft: &str, misc: &str) -> Record {
        Record {
            id: id.to_string(),
            location_flags: location.to_string(),
            type_of_ufo_craft_flags: craft.to_string(),
            miscellaneous_flags: misc.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_single_field_match() {
        let records = vec![
            flagged("1", "Nuclear facility", "", ""),
            flagged("2", "", "Disc", ""),
        ];

        let out = filter_by_code(&records, "Nuclear");

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "1");
    }

    #[test]
    fn test_duplicates_per_matching_field() {
        let records = vec![
            flagged("1", "Nuclear", "", "Nuclear, Photos"),
            flagged("2", "", "Nuclear", ""),
        ];

        let out = filter_by_code(&records, "Nuclear");
        let ids: Vec<_> = out.iter().map(|r| r.id.as_str()).collect();

        assert_eq!(ids, vec!["1", "1", "2"]);
    }

    #[test]
    fn test_match_is_case_sensitive_substring() {
        let records = vec![
            flagged("1", "nuclear", "", ""),
            flagged("2", "", "ThermoNuclearGlow", ""),
        ];

        let out = filter_by_code(&records, "Nuclear");

        assert_eq!(out.len(), 1);
        assert_eq!(out[0].id, "2");
    }

    #[test]
    fn test_non_flag_fields_ignored() {
        let records = vec![Record {
            id: "1".to_string(),
            description: "Nuclear plant nearby".to_string(),
            title: "Nuclear".to_string(),
            ..Default::default()
        }];

        assert!(filter_by_code(&records, "Nuclear").is_empty());
    }

    #[test]
    fn test_every_flag_field_is_scanned() {
        let mut record = Record::default();
        for name in crate::record::FLAG_FIELDS {
            record.set(name, "Radar".to_string());
        }
        let records = vec![record];

        assert_eq!(filter_by_code(&records, "Radar").len(), 8);
    }
}
