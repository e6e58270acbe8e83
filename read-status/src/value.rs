//! Who has seen a message.

/// Read-receipt summary for a single message.
///
/// Values are replaced wholesale when the receipt state changes; nothing
/// mutates a value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ReadStatusValue {
    /// No recipient has seen the message yet.
    #[default]
    None,
    /// The listed recipients, in display order, have seen the message.
    Some(Vec<String>),
    /// Every recipient has seen the message.
    All,
}

impl ReadStatusValue {
    pub fn some<I, S>(people: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Some(people.into_iter().map(Into::into).collect())
    }

    /// Recipients named by this value. Empty for `None` and `All`.
    pub fn people(&self) -> &[String] {
        match self {
            Self::Some(people) => people,
            Self::None | Self::All => &[],
        }
    }

    /// Whether at least one recipient has seen the message.
    pub fn is_seen(&self) -> bool {
        match self {
            Self::None => false,
            Self::Some(people) => !people.is_empty(),
            Self::All => true,
        }
    }
}
