use std::collections::BTreeMap;

use crate::record::Record;

/// Splits one flag field into tags.
///
/// Spaces inside a token are removed (`"Close Encounter"` counts as
/// `"CloseEncounter"`) and empty tokens are dropped.
pub fn split_tags(field: &str) -> impl Iterator<Item = String> + '_ {
    field
        .split(',')
        .map(|token| token.replace(' ', ""))
        .filter(|tag| !tag.is_empty())
}

/// Counts every tag across all flag fields of all records.
pub fn extract_tag_count<'a, I>(records: I) -> BTreeMap<String, usize>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut tags = BTreeMap::new();

    for record in records {
        for field in record.flags() {
            for tag in split_tags(field) {
                *tags.entry(tag).or_insert(0) += 1;
            }
        }
    }

    tags
}

/// Orders tag counts from most to least frequent; equal counts by tag name.
pub fn rank_tags(tags: &BTreeMap<String, usize>) -> Vec<(&str, usize)> {
    let mut ranked: Vec<(&str, usize)> = tags.iter().map(|(t, c)| (t.as_str(), *c)).collect();
    // BTreeMap iteration is already name-ordered, stable sort keeps that on ties
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}
