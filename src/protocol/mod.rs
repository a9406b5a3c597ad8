/*
 *  The wire codec peers use to talk to each other through the relay: one
 *  UTF-8 line per message, first-token dispatch, sender's own frame.
 */

use crate::engine::prelude::*;
use crate::utils::prelude::*;

/// One decoded line of the wire protocol. Every index carried here is still
/// in the *sender's* frame; callers must `reverse` before handing it to an
/// opponent-apply entry point (see `Message::apply_to`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Message {
    Colour(Colour),
    Move { from: usize, to: usize },
    EnPassantOpportunity { under_square: usize, move_index: u64 },
    WallBuild { from: usize, adjacent: usize },
    Promotion { from: usize, to: usize, kind: PromotionKind },
    Loss,
    /// Anything that doesn't parse under one of the known prefixes. The
    /// source treats this the same as a disconnect; see spec.md §7.
    Unknown,
}

impl Message {
    /// Parses a single line. Dispatch is keyed on the first whitespace-
    /// separated token, not a substring search - the source's own
    /// `contains("TO")` classifier would misfire on `ENPS`/`PROM`/anything
    /// else that happens to contain the letters "TO".
    pub fn decode(line: &str) -> Message {
        let mut tokens = line.split_whitespace();
        let Some(head) = tokens.next() else {
            return Message::Unknown;
        };

        match head {
            "WHITE" => Message::Colour(Colour::White),
            "BLACK" => Message::Colour(Colour::Black),
            "TO" => parse_move(tokens).unwrap_or(Message::Unknown),
            "ENPS" => parse_enps(tokens).unwrap_or(Message::Unknown),
            "WALL" => parse_wall(tokens).unwrap_or(Message::Unknown),
            "PROM" => parse_prom(tokens).unwrap_or(Message::Unknown),
            "LOSE" => Message::Loss,
            _ => Message::Unknown,
        }
    }

    /// Renders this message back onto the wire. `Unknown` has no wire form;
    /// a sender never produces one on purpose.
    pub fn encode(&self) -> String {
        match self {
            Message::Colour(Colour::White) => "WHITE".to_string(),
            Message::Colour(Colour::Black) => "BLACK".to_string(),
            Message::Move { from, to } => format!("TO {from} {to}"),
            Message::EnPassantOpportunity { under_square, move_index } => {
                format!("ENPS {under_square} {move_index}")
            }
            Message::WallBuild { from, adjacent } => format!("WALL {from} {adjacent}"),
            Message::Promotion { from, to, kind } => {
                format!("PROM {from} {to} {}", kind.notate())
            }
            Message::Loss => "LOSE".to_string(),
            Message::Unknown => String::new(),
        }
    }

    /// Applies this message to `engine`, mirroring an opponent's action.
    /// Indices arrive in the opponent's own frame and must be reversed
    /// before they mean anything on our board (invariant I5).
    ///
    /// `EnPassantOpportunity` and `Colour` carry no opponent-apply mutation
    /// of their own: the opportunity is registered directly (its square is
    /// already meaningful in our frame per spec.md §4.C), and a colour
    /// assignment is consumed by the caller before an engine even exists.
    pub fn apply_to(&self, engine: &mut ChessEngine) -> Result<()> {
        match *self {
            Message::Colour(_) => Err(anyhow!("colour assignment is not an in-game message")),
            Message::Move { from, to } => {
                engine.opponent_move(engine.reverse(from), engine.reverse(to));
                Ok(())
            }
            Message::EnPassantOpportunity { under_square, move_index } => {
                engine.add_en_passant_opportunity(under_square, move_index);
                Ok(())
            }
            Message::WallBuild { from, adjacent } => {
                engine.build_wall_opponent(engine.reverse(from), engine.reverse(adjacent));
                Ok(())
            }
            Message::Promotion { from, to, kind } => {
                engine.opponent_promote(engine.reverse(from), engine.reverse(to), kind);
                Ok(())
            }
            Message::Loss => Ok(()),
            Message::Unknown => Err(anyhow!("unrecognized message")),
        }
    }
}

fn parse_move<'a>(mut tokens: impl Iterator<Item = &'a str>) -> Option<Message> {
    let from = tokens.next()?.parse().ok()?;
    let to = tokens.next()?.parse().ok()?;
    Some(Message::Move { from, to })
}

fn parse_enps<'a>(mut tokens: impl Iterator<Item = &'a str>) -> Option<Message> {
    let under_square = tokens.next()?.parse().ok()?;
    let move_index = tokens.next()?.parse().ok()?;
    Some(Message::EnPassantOpportunity { under_square, move_index })
}

fn parse_wall<'a>(mut tokens: impl Iterator<Item = &'a str>) -> Option<Message> {
    let from = tokens.next()?.parse().ok()?;
    let adjacent = tokens.next()?.parse().ok()?;
    Some(Message::WallBuild { from, adjacent })
}

fn parse_prom<'a>(mut tokens: impl Iterator<Item = &'a str>) -> Option<Message> {
    let from = tokens.next()?.parse().ok()?;
    let to = tokens.next()?.parse().ok()?;
    let kind = PromotionKind::parse(tokens.next()?.chars().next()?)?;
    Some(Message::Promotion { from, to, kind })
}
