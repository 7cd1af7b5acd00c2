use super::*;

pub fn extract_profile(patterns: &SheetPatterns, text: &str) -> Option<Profile> {
    let captures = patterns.profile_header.captures(text)?;
    let field = |name: &str| {
        captures
            .name(name)
            .map(|value| value.as_str().trim().to_string())
            .unwrap_or_default()
    };

    Some(Profile {
        name: field("name"),
        fighting_style: field("style"),
        element: field("element"),
        signature_move: field("signature"),
        ultimate: field("ultimate"),
    })
}

pub fn extract_base_stats(
    patterns: &SheetPatterns,
    outline: &SheetOutline<'_>,
) -> Option<BTreeMap<String, i64>> {
    let heading = outline.find_heading(|heading| {
        normalize_title(heading.title)
            .rsplit(' ')
            .next()
            .map(|word| word == "stats")
            .unwrap_or(false)
    })?;
    let block = first_fenced_block(outline.body_lines(heading))?;

    let mut stats = BTreeMap::new();
    for line in block {
        let Some(captures) = patterns.stat_line.captures(line) else {
            continue;
        };
        let label = captures
            .name("label")
            .map(|value| normalize_stat_name(value.as_str()))
            .unwrap_or_default();
        if label.is_empty() {
            continue;
        }
        let raw_value = captures
            .name("value")
            .map(|value| value.as_str())
            .unwrap_or_default();

        match raw_value.parse::<i64>() {
            Ok(value) => {
                stats.insert(label, value);
            }
            Err(err) => {
                warn!(stat = %label, value = %raw_value, error = %err, "skipping unparsable stat value");
            }
        }
    }

    if stats.is_empty() { None } else { Some(stats) }
}

pub fn normalize_stat_name(raw: &str) -> String {
    raw.trim()
        .split(|ch: char| ch.is_whitespace() || ch == '-' || ch == '_')
        .filter(|part| !part.is_empty())
        .map(|part| part.to_lowercase())
        .collect::<Vec<String>>()
        .join("_")
}

pub fn extract_special_attributes(
    patterns: &SheetPatterns,
    outline: &SheetOutline<'_>,
) -> Option<Vec<NamedEntry>> {
    let heading =
        outline.find_heading(|heading| title_matches(heading.title, "Special Attributes"))?;
    let entries = parse_named_entries(patterns, outline.body_lines(heading));
    if entries.is_empty() { None } else { Some(entries) }
}

pub fn extract_achievements(
    patterns: &SheetPatterns,
    outline: &SheetOutline<'_>,
) -> Option<Vec<NamedEntry>> {
    let heading = outline.find_heading(|heading| title_matches(heading.title, "Achievements"))?;
    let entries = parse_named_entries(patterns, outline.body_lines(heading));
    if entries.is_empty() { None } else { Some(entries) }
}

fn parse_named_entries(patterns: &SheetPatterns, lines: &[&str]) -> Vec<NamedEntry> {
    let mut entries = Vec::new();
    let mut in_fence = false;

    for line in lines {
        if is_fence(line) {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        let Some(captures) = patterns.list_entry.captures(line) else {
            continue;
        };
        let name = captures
            .name("name")
            .map(|value| value.as_str().trim().to_string())
            .unwrap_or_default();
        if name.is_empty() {
            continue;
        }
        let description = captures
            .name("description")
            .map(|value| value.as_str().trim().to_string())
            .unwrap_or_default();

        entries.push(NamedEntry { name, description });
    }

    entries
}

/// Every `vs <System>` heading becomes one matchup keyed `vs<System>`.
/// A repeated system overwrites the earlier entry.
pub fn extract_matchups(
    patterns: &SheetPatterns,
    outline: &SheetOutline<'_>,
) -> Option<BTreeMap<String, Matchup>> {
    let mut matchups = BTreeMap::new();

    for heading in outline.headings() {
        let title = heading
            .title
            .trim_start_matches(|ch: char| !ch.is_alphanumeric());
        let Some(captures) = patterns.matchup_title.captures(title) else {
            continue;
        };
        let system = captures
            .name("name")
            .map(|value| value.as_str().split_whitespace().collect::<String>())
            .unwrap_or_default();
        if system.is_empty() {
            continue;
        }

        let labels = labelled_values(patterns, outline.body_lines(heading));
        let lookup = |label: &str| labels.get(label).cloned().unwrap_or_default();
        let matchup = Matchup {
            synergy: lookup("synergy"),
            combo: lookup("combo"),
            strategy: lookup("strategy"),
        };

        let key = format!("vs{system}");
        if matchups.insert(key.clone(), matchup).is_some() {
            debug!(matchup = %key, "duplicate matchup section replaced earlier entry");
        }
    }

    if matchups.is_empty() { None } else { Some(matchups) }
}

pub fn extract_encryption(
    patterns: &SheetPatterns,
    outline: &SheetOutline<'_>,
) -> Option<Encryption> {
    let heading = outline.find_heading(|heading| {
        normalize_title(heading.title)
            .split(' ')
            .any(|word| word == "encryption")
    })?;
    let lines = outline.body_lines(heading);
    let body = outline.body_text(heading);
    let labels = labelled_values(patterns, lines);

    Some(Encryption {
        primary_hash: detect_hash_algorithm(&body),
        signatures: detect_signature_scheme(&body),
        key_management: labels
            .get("key management")
            .filter(|value| !value.is_empty())
            .cloned()
            .unwrap_or_else(|| UNSPECIFIED.to_string()),
        tamper_detection: labels
            .get("tamper detection")
            .filter(|value| !value.is_empty())
            .cloned()
            .unwrap_or_else(|| UNSPECIFIED.to_string()),
    })
}

pub fn detect_hash_algorithm(body: &str) -> HashAlgorithm {
    let upper = body.to_uppercase();
    if upper.contains("SHA256") || upper.contains("SHA-256") {
        HashAlgorithm::Sha256
    } else if upper.contains("SHA512") || upper.contains("SHA-512") {
        HashAlgorithm::Sha512
    } else if upper.contains("BLAKE3") {
        HashAlgorithm::Blake3
    } else {
        HashAlgorithm::Unknown
    }
}

pub fn detect_signature_scheme(body: &str) -> SignatureScheme {
    let upper = body.to_uppercase();
    if upper.contains("ECDSA") {
        SignatureScheme::Ecdsa
    } else if upper.contains("ED25519") {
        SignatureScheme::Ed25519
    } else {
        SignatureScheme::Unknown
    }
}

/// Metrics from every heading ending in "Performance", merged in document order.
pub fn extract_core_metrics(
    patterns: &SheetPatterns,
    outline: &SheetOutline<'_>,
) -> Option<BTreeMap<String, String>> {
    let mut metrics = BTreeMap::new();

    for heading in outline.headings() {
        let title = normalize_title(heading.title);
        if !title.ends_with("performance") {
            continue;
        }

        for line in outline.body_lines(heading) {
            let Some(captures) = patterns.metric_line.captures(line) else {
                continue;
            };
            let name = captures
                .name("bold")
                .or_else(|| captures.name("plain"))
                .map(|value| value.as_str().trim().to_string())
                .unwrap_or_default();
            let value = captures
                .name("value")
                .map(|value| value.as_str().trim().to_string())
                .unwrap_or_default();
            if name.is_empty() || value.is_empty() {
                continue;
            }
            metrics.insert(name, value);
        }
    }

    if metrics.is_empty() { None } else { Some(metrics) }
}

/// `**Label:** value` lines keyed by lowercased label; first occurrence wins.
fn labelled_values(patterns: &SheetPatterns, lines: &[&str]) -> BTreeMap<String, String> {
    let mut values = BTreeMap::new();

    for line in lines {
        let Some(captures) = patterns.label_line.captures(line) else {
            continue;
        };
        let label = captures
            .name("label")
            .map(|value| value.as_str().trim().to_lowercase())
            .unwrap_or_default();
        let value = captures
            .name("value")
            .map(|value| value.as_str().trim().to_string())
            .unwrap_or_default();
        values.entry(label).or_insert(value);
    }

    values
}
