use parley::domain::{AvatarVariant, avatar_uri};

#[test]
fn same_seed_and_variant_are_deterministic() {
    assert_eq!(
        avatar_uri("Ada", AvatarVariant::Initials),
        avatar_uri("Ada", AvatarVariant::Initials)
    );
}

#[test]
fn variants_produce_distinct_uris() {
    assert_ne!(
        avatar_uri("Ada", AvatarVariant::Initials),
        avatar_uri("Ada", AvatarVariant::BotttsNeutral)
    );
}

#[test]
fn seed_is_percent_encoded() {
    let uri = avatar_uri("Ada Lovelace", AvatarVariant::Initials);
    assert!(uri.ends_with("seed=Ada%20Lovelace"));
}
