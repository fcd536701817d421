//! Core types shared by the section codecs.

use std::fmt;

/// One of the four trace channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Channel {
    A,
    C,
    G,
    T,
}

impl Channel {
    /// All channels in SCF storage order.
    pub const ALL: [Self; 4] = [Self::A, Self::C, Self::G, Self::T];

    /// Returns the channel's nucleotide letter.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::A => 'A',
            Self::C => 'C',
            Self::G => 'G',
            Self::T => 'T',
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// One value per trace channel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChannelGroup<T> {
    pub a: T,
    pub c: T,
    pub g: T,
    pub t: T,
}

impl<T> ChannelGroup<T> {
    #[must_use]
    pub const fn new(a: T, c: T, g: T, t: T) -> Self {
        Self { a, c, g, t }
    }

    /// Builds a group by calling `f` once per channel in storage order.
    pub fn from_fn(mut f: impl FnMut(Channel) -> T) -> Self {
        Self {
            a: f(Channel::A),
            c: f(Channel::C),
            g: f(Channel::G),
            t: f(Channel::T),
        }
    }

    #[must_use]
    pub const fn get(&self, channel: Channel) -> &T {
        match channel {
            Channel::A => &self.a,
            Channel::C => &self.c,
            Channel::G => &self.g,
            Channel::T => &self.t,
        }
    }

    pub fn get_mut(&mut self, channel: Channel) -> &mut T {
        match channel {
            Channel::A => &mut self.a,
            Channel::C => &mut self.c,
            Channel::G => &mut self.g,
            Channel::T => &mut self.t,
        }
    }

    /// Iterates channels in storage order.
    pub fn iter(&self) -> impl Iterator<Item = (Channel, &T)> + '_ {
        Channel::ALL.into_iter().map(move |ch| (ch, self.get(ch)))
    }

    /// Consumes the group, yielding channels in storage order.
    pub fn into_entries(self) -> [(Channel, T); 4] {
        [
            (Channel::A, self.a),
            (Channel::C, self.c),
            (Channel::G, self.g),
            (Channel::T, self.t),
        ]
    }

    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> ChannelGroup<U> {
        ChannelGroup {
            a: f(self.a),
            c: f(self.c),
            g: f(self.g),
            t: f(self.t),
        }
    }
}

/// Quality clip points carried in the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClipRange {
    /// Number of bases clipped from the start.
    pub left: u32,
    /// Number of bases clipped from the end.
    pub right: u32,
}

impl ClipRange {
    /// True when neither end is clipped.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.left == 0 && self.right == 0
    }
}
