use color_eyre::{eyre::bail, Result};
use uuid::Uuid;

/// Number of id characters shown in listings.
pub const SHORT_LEN: usize = 8;

pub fn short(id: Uuid) -> String {
    id.hyphenated().to_string()[..SHORT_LEN].to_string()
}

/// Resolve a full id or a unique, case-insensitive prefix of one.
pub fn resolve<'a>(input: &str, ids: impl IntoIterator<Item = &'a Uuid>) -> Result<Uuid> {
    let needle = input.trim().to_ascii_lowercase();
    if needle.is_empty() {
        bail!("an id is required");
    }

    let mut matches = ids
        .into_iter()
        .filter(|id| id.hyphenated().to_string().starts_with(&needle));
    match (matches.next(), matches.next()) {
        (Some(id), None) => Ok(*id),
        (None, _) => bail!("no entry with id `{input}`"),
        (Some(_), Some(_)) => bail!("id `{input}` is ambiguous; type more characters"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids() -> Vec<Uuid> {
        vec![
            Uuid::parse_str("3f2a9c10-0000-4000-8000-000000000001").expect("uuid"),
            Uuid::parse_str("3f2b0000-0000-4000-8000-000000000002").expect("uuid"),
            Uuid::parse_str("a1000000-0000-4000-8000-000000000003").expect("uuid"),
        ]
    }

    #[test]
    fn unique_prefix_resolves() {
        let ids = ids();
        assert_eq!(resolve("3f2a", &ids).expect("resolve"), ids[0]);
        assert_eq!(resolve("A1", &ids).expect("resolve"), ids[2]);
    }

    #[test]
    fn full_id_resolves() {
        let ids = ids();
        assert_eq!(
            resolve("3f2b0000-0000-4000-8000-000000000002", &ids).expect("resolve"),
            ids[1]
        );
    }

    #[test]
    fn ambiguous_and_unknown_prefixes_fail() {
        let ids = ids();
        assert!(resolve("3f2", &ids).is_err());
        assert!(resolve("ff", &ids).is_err());
        assert!(resolve("  ", &ids).is_err());
    }

    #[test]
    fn short_form_is_prefix() {
        let ids = ids();
        assert_eq!(short(ids[0]), "3f2a9c10");
    }
}
