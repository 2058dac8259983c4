use crate::document::{key_text, Document, Section};
use crate::error::MergeError;
use indexmap::IndexMap;
use serde_yaml::Mapping;
use std::path::Path;
use tracing::{info, warn};

/// Number of entries a partial contributed to each section
pub type MergeStats = IndexMap<Section, usize>;

/// Keys present in both mappings, in `source` order
fn overlapping_keys(target: &Mapping, source: &Mapping) -> Vec<String> {
    source
        .keys()
        .filter(|key| target.contains_key(*key))
        .map(key_text)
        .collect()
}

/// Copies every entry of `source` into `target`.
///
/// Fails without touching `target` if any key already exists there.
pub fn merge_section(
    target: &mut Mapping,
    source: Mapping,
    section: Section,
    source_path: &Path,
) -> Result<usize, MergeError> {
    let duplicates = overlapping_keys(target, &source);
    if !duplicates.is_empty() {
        return Err(MergeError::DuplicateKeys {
            section,
            keys: duplicates,
            path: source_path.to_path_buf(),
        });
    }

    let added = source.len();
    target.extend(source);
    Ok(added)
}

/// Merges the four sections of a partial into the main document.
///
/// All sections are checked for duplicates before any is copied, so a
/// rejected partial leaves `target` as it was.
pub fn merge_partial(target: &mut Document, source: Document) -> Result<MergeStats, MergeError> {
    for section in Section::ALL {
        let duplicates = overlapping_keys(target.section(section), source.section(section));
        if !duplicates.is_empty() {
            return Err(MergeError::DuplicateKeys {
                section,
                keys: duplicates,
                path: source.path().to_path_buf(),
            });
        }
    }

    let (source_path, sections, other_components) = source.into_sections();

    if !other_components.is_empty() {
        let ignored: Vec<String> = other_components.keys().map(key_text).collect();
        warn!(
            path = %source_path.display(),
            "Ignoring components [{}]; only schemas, parameters and responses are merged",
            ignored.join(", ")
        );
    }

    let mut stats = MergeStats::new();
    for (section, entries) in sections {
        let added = merge_section(target.section_mut(section), entries, section, &source_path)?;
        stats.insert(section, added);
    }

    info!(
        path = %source_path.display(),
        paths = stats[&Section::Paths],
        schemas = stats[&Section::Schemas],
        parameters = stats[&Section::Parameters],
        responses = stats[&Section::Responses],
        "Merged partial"
    );

    Ok(stats)
}
