use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// The thirteen named ranks. The discriminant is the raw rank number (ace = 1, king = 13).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Rank {
    Ace = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Seven = 7,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Raw rank number used for straights and the high-card pick.
    pub const fn number(self) -> u8 {
        self as u8
    }

    /// Point value used by every scoring formula: ace 1, numerals face value, courts 10.
    pub const fn points(self) -> u32 {
        let n = self as u32;
        if n > 10 {
            10
        } else {
            n
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }

    /// Name used in saved games.
    pub const fn name(self) -> &'static str {
        match self {
            Rank::Ace => "ace",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "jack",
            Rank::Queen => "queen",
            Rank::King => "king",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Rank {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let r = match s.trim().to_ascii_lowercase().as_str() {
            "a" | "1" | "ace" => Rank::Ace,
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "10" | "t" => Rank::Ten,
            "j" | "jack" => Rank::Jack,
            "q" | "queen" => Rank::Queen,
            "k" | "king" => Rank::King,
            _ => return Err(CardParseError::Rank(s.to_string())),
        };
        Ok(r)
    }
}

/// The four suits, in card-space order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub const fn symbol(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Suit::Spades => "spades",
            Suit::Hearts => "hearts",
            Suit::Diamonds => "diamonds",
            Suit::Clubs => "clubs",
        }
    }

    pub const fn color(self) -> JokerColor {
        match self {
            Suit::Hearts | Suit::Diamonds => JokerColor::Red,
            Suit::Spades | Suit::Clubs => JokerColor::Black,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Suit {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let mut chars = t.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Suit::try_from(c);
        }
        match t.to_ascii_lowercase().as_str() {
            "spades" => Ok(Suit::Spades),
            "hearts" => Ok(Suit::Hearts),
            "diamonds" => Ok(Suit::Diamonds),
            "clubs" => Ok(Suit::Clubs),
            _ => Err(CardParseError::Suit(s.to_string())),
        }
    }
}

impl TryFrom<char> for Suit {
    type Error = CardParseError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_lowercase() {
            's' | '♠' => Ok(Suit::Spades),
            'h' | '♥' => Ok(Suit::Hearts),
            'd' | '♦' => Ok(Suit::Diamonds),
            'c' | '♣' => Ok(Suit::Clubs),
            _ => Err(CardParseError::Suit(c.to_string())),
        }
    }
}

/// Colour tag of a joker; restricts the suits it may stand in for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum JokerColor {
    Red,
    Black,
}

impl JokerColor {
    pub const fn suits(self) -> [Suit; 2] {
        match self {
            JokerColor::Red => [Suit::Hearts, Suit::Diamonds],
            JokerColor::Black => [Suit::Spades, Suit::Clubs],
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            JokerColor::Red => "red",
            JokerColor::Black => "black",
        }
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardParseError {
    #[error("invalid rank: '{0}'")]
    Rank(String),
    #[error("invalid suit: '{0}'")]
    Suit(String),
    #[error("invalid joker colour: '{0}'")]
    JokerColor(String),
    #[error("invalid card: '{0}'")]
    Invalid(String),
}

/// A concrete (non-wildcard) card: rank + suit. This is what the evaluator scores.
///
/// ```
/// use solotro::cards::{PlainCard, Rank, Suit};
///
/// let card = PlainCard::new(Rank::Ten, Suit::Hearts);
/// assert_eq!(card.to_string(), "10♥");
/// assert_eq!("10h".parse::<PlainCard>().unwrap(), card);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlainCard {
    rank: Rank,
    suit: Suit,
}

impl PlainCard {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn rank(self) -> Rank {
        self.rank
    }

    pub const fn suit(self) -> Suit {
        self.suit
    }
}

impl fmt::Display for PlainCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl FromStr for PlainCard {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        // suit is the last char (letter or symbol), rank is everything before it
        let mut chars = t.chars();
        let suit_ch = chars.next_back().ok_or_else(|| CardParseError::Invalid(s.to_string()))?;
        let rank_str = chars.as_str();
        if rank_str.is_empty() {
            return Err(CardParseError::Invalid(s.to_string()));
        }
        Ok(PlainCard::new(rank_str.parse()?, Suit::try_from(suit_ch)?))
    }
}

/// What a card shows: a concrete rank/suit or a coloured joker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Face {
    Plain(PlainCard),
    Joker(JokerColor),
}

impl Face {
    pub const fn is_joker(self) -> bool {
        matches!(self, Face::Joker(_))
    }

    pub const fn plain(self) -> Option<PlainCard> {
        match self {
            Face::Plain(c) => Some(c),
            Face::Joker(_) => None,
        }
    }
}

impl From<PlainCard> for Face {
    fn from(card: PlainCard) -> Self {
        Face::Plain(card)
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Face::Plain(c) => c.fmt(f),
            Face::Joker(JokerColor::Red) => f.write_str("Red Joker"),
            Face::Joker(JokerColor::Black) => f.write_str("Black Joker"),
        }
    }
}

impl FromStr for Face {
    type Err = CardParseError;

    /// Jokers are written `RJ` / `BJ` (or `red-joker` / `black-joker`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rj" | "red-joker" => Ok(Face::Joker(JokerColor::Red)),
            "bj" | "black-joker" => Ok(Face::Joker(JokerColor::Black)),
            _ => s.parse::<PlainCard>().map(Face::Plain),
        }
    }
}

/// Parse faces separated by whitespace or commas.
///
/// ```
/// use solotro::cards::{parse_faces, Face, JokerColor};
///
/// let faces = parse_faces("Ah, 2h 3h 4h RJ").unwrap();
/// assert_eq!(faces.len(), 5);
/// assert_eq!(faces[4], Face::Joker(JokerColor::Red));
/// ```
pub fn parse_faces(input: &str) -> Result<Vec<Face>, CardParseError> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(Face::from_str)
        .collect()
}

/// Parse concrete cards separated by whitespace or commas.
pub fn parse_plain(input: &str) -> Result<Vec<PlainCard>, CardParseError> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(PlainCard::from_str)
        .collect()
}

/// Opaque per-draw identity. Two cards with the same face never share an id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(Uuid);

impl CardId {
    pub const fn from_u128(v: u128) -> Self {
        Self(Uuid::from_u128(v))
    }

    pub(crate) fn from_random_bytes(bytes: [u8; 16]) -> Self {
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A dealt card: an identity plus its face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CardRecord", into = "CardRecord")]
pub struct Card {
    id: CardId,
    face: Face,
}

impl Card {
    pub const fn new(id: CardId, face: Face) -> Self {
        Self { id, face }
    }

    pub const fn id(self) -> CardId {
        self.id
    }

    pub const fn face(self) -> Face {
        self.face
    }

    pub const fn is_joker(self) -> bool {
        self.face.is_joker()
    }

    /// Derived display label, e.g. `Q♦` or `Black Joker`.
    pub fn label(self) -> String {
        self.face.to_string()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.face.fmt(f)
    }
}

/// Saved-game shape of a card.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CardRecord {
    id: CardId,
    rank: String,
    suit: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
    #[serde(default)]
    label: String,
}

impl From<Card> for CardRecord {
    fn from(card: Card) -> Self {
        let (rank, suit, color) = match card.face {
            Face::Plain(c) => (c.rank().name(), c.suit().name(), None),
            Face::Joker(color) => ("joker", "joker", Some(color.name().to_string())),
        };
        CardRecord {
            id: card.id,
            rank: rank.to_string(),
            suit: suit.to_string(),
            color,
            label: card.label(),
        }
    }
}

impl TryFrom<CardRecord> for Card {
    type Error = CardParseError;

    fn try_from(rec: CardRecord) -> Result<Self, Self::Error> {
        let face = if rec.rank == "joker" {
            let color = match rec.color.as_deref() {
                Some("red") => JokerColor::Red,
                Some("black") => JokerColor::Black,
                other => {
                    return Err(CardParseError::JokerColor(other.unwrap_or_default().to_string()))
                }
            };
            Face::Joker(color)
        } else {
            Face::Plain(PlainCard::new(rec.rank.parse()?, rec.suit.parse()?))
        };
        Ok(Card::new(rec.id, face))
    }
}
