//! Battle-log line interpreter
//!
//! Classifies free-text battle-log lines against a fixed template table.
//! The first matching template wins; a line no template matches is silently
//! ignored, and a line that matches a template but fails parameter
//! extraction is reported as unparseable so callers can tell silence from
//! failure.

use crate::events::LogEvent;
use crate::ident::{PositionToken, SideId, Stat};

/// Outcome of classifying one battle-log line
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// The line matched a template and produced a typed event
    Event(LogEvent),
    /// No template matched; the line carries no tracked information
    NoEvent,
    /// A template matched but a parameter could not be extracted
    Unparseable,
}

/// One token of a line template
enum Tok {
    /// Literal word that must match exactly
    Lit(&'static str),
    /// Single-word parameter
    Arg,
    /// Parameter spanning all remaining words (at least one); must be last
    Rest,
}

/// A structural template mapping a line shape to an event constructor
struct Template {
    tokens: &'static [Tok],
    build: fn(&[String]) -> Option<LogEvent>,
}

impl Template {
    /// Try to capture this template's parameters from the line's words.
    /// Returns None if the line does not have this template's shape.
    fn capture(&self, words: &[&str]) -> Option<Vec<String>> {
        let mut args = Vec::new();
        let mut i = 0;

        for tok in self.tokens {
            match tok {
                Tok::Lit(lit) => {
                    if words.get(i) != Some(lit) {
                        return None;
                    }
                    i += 1;
                }
                Tok::Arg => {
                    args.push(words.get(i)?.to_string());
                    i += 1;
                }
                Tok::Rest => {
                    if i >= words.len() {
                        return None;
                    }
                    args.push(words[i..].join(" "));
                    i = words.len();
                }
            }
        }

        if i == words.len() { Some(args) } else { None }
    }
}

/// The fixed template table; first match wins
const TEMPLATES: &[Template] = &[
    // boost <stat> <amount> <combatant>
    Template {
        tokens: &[Tok::Lit("boost"), Tok::Arg, Tok::Arg, Tok::Rest],
        build: |args| build_stage(args, 1),
    },
    // unboost <stat> <amount> <combatant>
    Template {
        tokens: &[Tok::Lit("unboost"), Tok::Arg, Tok::Arg, Tok::Rest],
        build: |args| build_stage(args, -1),
    },
    // weather <kind> start
    Template {
        tokens: &[Tok::Lit("weather"), Tok::Arg, Tok::Lit("start")],
        build: |args| {
            Some(LogEvent::FieldStart {
                kind: args[0].clone(),
            })
        },
    },
    // weather <kind> end
    Template {
        tokens: &[Tok::Lit("weather"), Tok::Arg, Tok::Lit("end")],
        build: |args| {
            Some(LogEvent::FieldEnd {
                kind: args[0].clone(),
            })
        },
    },
    // field <kind> start
    Template {
        tokens: &[Tok::Lit("field"), Tok::Arg, Tok::Lit("start")],
        build: |args| {
            Some(LogEvent::FieldStart {
                kind: args[0].clone(),
            })
        },
    },
    // field <kind> end
    Template {
        tokens: &[Tok::Lit("field"), Tok::Arg, Tok::Lit("end")],
        build: |args| {
            Some(LogEvent::FieldEnd {
                kind: args[0].clone(),
            })
        },
    },
    // sidestart <side> <condition>
    Template {
        tokens: &[Tok::Lit("sidestart"), Tok::Arg, Tok::Rest],
        build: |args| {
            Some(LogEvent::SideStart {
                side: SideId::parse(&args[0])?,
                kind: args[1].clone(),
            })
        },
    },
    // sideend <side> <condition>
    Template {
        tokens: &[Tok::Lit("sideend"), Tok::Arg, Tok::Rest],
        build: |args| {
            Some(LogEvent::SideEnd {
                side: SideId::parse(&args[0])?,
                kind: args[1].clone(),
            })
        },
    },
    // switch <position> <combatant>
    Template {
        tokens: &[Tok::Lit("switch"), Tok::Arg, Tok::Rest],
        build: |args| {
            Some(LogEvent::Switch {
                position: PositionToken::parse(&args[0])?,
                name: args[1].clone(),
            })
        },
    },
    // faint <combatant>
    Template {
        tokens: &[Tok::Lit("faint"), Tok::Rest],
        build: |args| {
            Some(LogEvent::Faint {
                name: args[0].clone(),
            })
        },
    },
    // status <ailment> <combatant>
    Template {
        tokens: &[Tok::Lit("status"), Tok::Arg, Tok::Rest],
        build: |args| {
            Some(LogEvent::StatusSet {
                name: args[1].clone(),
                ailment: args[0].clone(),
            })
        },
    },
    // curestatus <combatant>
    Template {
        tokens: &[Tok::Lit("curestatus"), Tok::Rest],
        build: |args| {
            Some(LogEvent::StatusCure {
                name: args[0].clone(),
            })
        },
    },
    // turn <number>
    Template {
        tokens: &[Tok::Lit("turn"), Tok::Arg],
        build: |args| {
            Some(LogEvent::TurnAdvance {
                turn: args[0].parse().ok()?,
            })
        },
    },
    // win <actor>
    Template {
        tokens: &[Tok::Lit("win"), Tok::Rest],
        build: |args| {
            Some(LogEvent::BattleWon {
                winner: args[0].clone(),
            })
        },
    },
];

fn build_stage(args: &[String], sign: i8) -> Option<LogEvent> {
    let stat = Stat::parse(&args[0])?;
    let amount: i8 = args[1].parse().ok()?;
    Some(LogEvent::StatStage {
        name: args[2].clone(),
        stat,
        delta: sign * amount,
    })
}

/// Classify a single battle-log line
pub fn classify_line(line: &str) -> Classification {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Classification::NoEvent;
    }

    for template in TEMPLATES {
        if let Some(args) = template.capture(&words) {
            return match (template.build)(&args) {
                Some(event) => Classification::Event(event),
                None => Classification::Unparseable,
            };
        }
    }

    Classification::NoEvent
}

/// Interpret an ordered batch of battle-log lines.
///
/// Lazy, finite, one-shot; output order matches input order. A single batch
/// may carry both a start and an end for the same condition, and consumers
/// rely on seeing them in sequence.
pub fn interpret_lines(lines: &[String]) -> impl Iterator<Item = Classification> + '_ {
    lines.iter().map(|line| classify_line(line))
}
