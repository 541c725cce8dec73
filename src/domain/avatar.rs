/// Visual style of a generated placeholder avatar. Humans get initials,
/// agents get a bot face, so the two speaker registries stay visually
/// distinct in rendered transcripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarVariant {
    Initials,
    BotttsNeutral,
}

impl AvatarVariant {
    fn style(&self) -> &'static str {
        match self {
            AvatarVariant::Initials => "initials",
            AvatarVariant::BotttsNeutral => "bottts-neutral",
        }
    }
}

/// Deterministic placeholder avatar URI for a display name. The same
/// seed and variant always produce the same URI.
pub fn avatar_uri(seed: &str, variant: AvatarVariant) -> String {
    format!(
        "https://api.dicebear.com/9.x/{}/svg?seed={}",
        variant.style(),
        urlencoding::encode(seed)
    )
}
