//! Section scanner for project documents.
//!
//! The scanner walks lines once. A line that matches a section header hands
//! the cursor to that section's consumer, which takes what it needs and
//! stops at a blank line, the end of input, or the next header it knows
//! about. Anything else is skipped one line at a time.
//!
//! Which headers stop which section is fixed per section (see the `*_STOP`
//! patterns) rather than derived from the header table, so lines that look
//! like data in one section stay data.

use crate::catalog::{BodySection, Metric, ProjectId, ProjectRecord};
use crate::document::{LineCursor, is_blank, split_labels};
use regex::{Captures, Regex};
use std::sync::LazyLock;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
/// Recognized section kinds.
pub enum Section {
    Title,
    Description,
    Metrics,
    Body,
    Tools,
    Models,
    Thumbnail,
}

type Consumer = fn(&mut LineCursor<'_>, &Captures<'_>, &mut ProjectRecord);

struct SectionRule {
    section: Section,
    header: Regex,
    consume: Consumer,
}

fn pattern(raw: &str) -> Regex {
    Regex::new(raw).expect("built-in section pattern must compile")
}

static SECTION_RULES: LazyLock<Vec<SectionRule>> = LazyLock::new(|| {
    vec![
        SectionRule {
            section: Section::Title,
            header: pattern(r"(?i)^Title:\s*$"),
            consume: consume_title,
        },
        SectionRule {
            section: Section::Description,
            header: pattern(r"(?i)^Description:\s*$"),
            consume: consume_description,
        },
        SectionRule {
            section: Section::Metrics,
            header: pattern(r"(?i)^Project Metrics:\s*$"),
            consume: consume_metrics,
        },
        SectionRule {
            section: Section::Body,
            header: pattern(
                r"(?i)^Body [0-9]+:\s*<Title:\s*([^>]+)>(?:\s*<Asset:\s*([^>]+)>)?\s*$",
            ),
            consume: consume_body,
        },
        SectionRule {
            section: Section::Tools,
            header: pattern(r"(?i)^Tools used:\s*$"),
            consume: consume_tools,
        },
        SectionRule {
            section: Section::Models,
            header: pattern(r"(?i)^Models:\s*$"),
            consume: consume_models,
        },
        SectionRule {
            section: Section::Thumbnail,
            header: pattern(r"(?i)^Thumbnail:\s*(.*)$"),
            consume: consume_thumbnail,
        },
    ]
});

static ANY_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    pattern(
        r"(?i)^(Title|Description|Project Metrics|Body [0-9]+|Tools used|Models|Thumbnail|Links):",
    )
});
static DESCRIPTION_STOP: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)^(Project Metrics|Body [0-9]|Tools used|Models|Links):"));
static BODY_STOP: LazyLock<Regex> =
    LazyLock::new(|| pattern(r"(?i)^(Body [0-9]|Tools used|Models|Links):"));
static MODELS_LOOKAHEAD_STOP: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"(?i)^(Title|Description|Project Metrics|Body [0-9]|Tools used|Links|Thumbnail):")
});
static THUMBNAIL_LOOKAHEAD_STOP: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"(?i)^(Title|Description|Project Metrics|Body [0-9]|Tools used|Links|Models):")
});
static METRIC_ITEM: LazyLock<Regex> = LazyLock::new(|| pattern(r"^\s*-\s+"));
static METRIC_LABEL: LazyLock<Regex> = LazyLock::new(|| pattern(r"^\s*-\s+(.+?):\s*$"));

/// Parse one project document. Never fails; the title falls back to `id`.
pub fn parse_project(id: ProjectId, text: &str) -> ProjectRecord {
    let mut record = ProjectRecord {
        id,
        ..Default::default()
    };
    let mut cursor = LineCursor::new(text);

    while let Some(line) = cursor.peek() {
        let matched = SECTION_RULES
            .iter()
            .find_map(|rule| rule.header.captures(line).map(|caps| (rule, caps)));
        cursor.advance();
        if let Some((rule, captures)) = matched {
            log::trace!("{}: {:?} section at {line:?}", record.id, rule.section);
            (rule.consume)(&mut cursor, &captures, &mut record);
        }
    }

    if record.title.is_empty() {
        record.title = record.id.0.clone();
    }
    record
}

fn consume_title(cursor: &mut LineCursor<'_>, _: &Captures<'_>, record: &mut ProjectRecord) {
    cursor.skip_blank();
    if let Some(line) = cursor.advance_if(|line| !ANY_HEADER.is_match(line.trim())) {
        record.title = line.trim().to_string();
    }
}

fn consume_description(
    cursor: &mut LineCursor<'_>,
    _: &Captures<'_>,
    record: &mut ProjectRecord,
) {
    let mut lines = Vec::new();
    while let Some(line) =
        cursor.advance_if(|line| !is_blank(line) && !DESCRIPTION_STOP.is_match(line))
    {
        lines.push(line.trim());
    }
    record.subtitle = lines.join(" ");
}

fn consume_metrics(cursor: &mut LineCursor<'_>, _: &Captures<'_>, record: &mut ProjectRecord) {
    cursor.skip_blank();
    while let Some(line) = cursor.advance_if(|line| METRIC_ITEM.is_match(line)) {
        let Some(label) = METRIC_LABEL.captures(line) else {
            log::debug!("{}: dropping metric line without a label: {line:?}", record.id);
            continue;
        };
        // The value line is taken as-is, even when blank.
        let value = cursor.advance().unwrap_or("").trim();
        record.metrics.push(Metric {
            label: label[1].trim().to_string(),
            value: value.to_string(),
        });
    }
}

fn consume_body(cursor: &mut LineCursor<'_>, header: &Captures<'_>, record: &mut ProjectRecord) {
    let title = header[1].trim().to_string();
    let assets = header
        .get(2)
        .map(|raw| split_labels(raw.as_str()))
        .unwrap_or_default();

    let mut lines = Vec::new();
    while let Some(line) = cursor.advance_if(|line| !is_blank(line) && !BODY_STOP.is_match(line)) {
        lines.push(line.trim());
    }
    record.bodies.push(BodySection {
        title,
        content: lines.join(" "),
        assets,
    });
}

fn consume_tools(cursor: &mut LineCursor<'_>, _: &Captures<'_>, record: &mut ProjectRecord) {
    let tools = cursor.advance().unwrap_or("").trim();
    if !tools.is_empty() {
        record.stack = split_labels(tools);
    }
}

fn consume_models(cursor: &mut LineCursor<'_>, _: &Captures<'_>, record: &mut ProjectRecord) {
    if let Some(path) = lookahead_value(cursor, &MODELS_LOOKAHEAD_STOP) {
        record.model_path = path;
    }
}

fn consume_thumbnail(
    cursor: &mut LineCursor<'_>,
    header: &Captures<'_>,
    record: &mut ProjectRecord,
) {
    let inline = header.get(1).map_or("", |m| m.as_str()).trim();
    record.thumbnail = if inline.is_empty() {
        lookahead_value(cursor, &THUMBNAIL_LOOKAHEAD_STOP).unwrap_or_default()
    } else {
        inline.to_string()
    };
}

/// Take the next line as a value unless it is blank or opens another section.
fn lookahead_value(cursor: &mut LineCursor<'_>, stop: &Regex) -> Option<String> {
    cursor
        .advance_if(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !stop.is_match(trimmed)
        })
        .map(|line| line.trim().to_string())
}
