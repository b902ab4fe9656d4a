use crate::catalog::ProfileRecord;
use crate::document::split_labels;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum ProfileField {
    Bio,
    Skills,
    ProfileImage,
}

impl ProfileField {
    fn from_header(line: &str) -> Option<Self> {
        let name = line.strip_suffix(':')?;
        if name.eq_ignore_ascii_case("bio") {
            Some(ProfileField::Bio)
        } else if name.eq_ignore_ascii_case("skills") {
            Some(ProfileField::Skills)
        } else if name.eq_ignore_ascii_case("profileimage") {
            Some(ProfileField::ProfileImage)
        } else {
            None
        }
    }
}

/// Parse `about/profile.txt`.
///
/// Header lines switch the active field; every other non-blank line feeds
/// it. Bio lines are space-joined, skills accumulate across lines, and the
/// last profile image line wins. Lines before the first header are dropped.
pub fn parse_profile(text: &str) -> ProfileRecord {
    let mut profile = ProfileRecord::default();
    let mut current: Option<ProfileField> = None;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(field) = ProfileField::from_header(trimmed) {
            current = Some(field);
            continue;
        }
        match current {
            Some(ProfileField::Bio) => {
                if !profile.bio.is_empty() {
                    profile.bio.push(' ');
                }
                profile.bio.push_str(trimmed);
            }
            Some(ProfileField::Skills) => profile.skills.extend(split_labels(trimmed)),
            Some(ProfileField::ProfileImage) => profile.profile_image = trimmed.to_string(),
            None => log::debug!("profile: dropping line outside any section: {trimmed:?}"),
        }
    }
    profile
}
