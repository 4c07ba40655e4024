use crate::pile::{PileId, TOTAL_FOUNDATIONS, TOTAL_TABLEAUS};

use anyhow::{Context, Result, bail};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Action {
    Draw,
    Redeal,
    Move {
        from: PileId,
        to: PileId,
        count: usize,
    },
    Undo,
}

impl Action {
    pub fn is_redeal(&self) -> bool {
        matches!(self, Action::Redeal)
    }

    pub fn single(from: PileId, to: PileId) -> Self {
        Action::Move { from, to, count: 1 }
    }
}

/// Parses whitespace separated actions: `D`, `3D`, `R`, `U`, `W:F1`,
/// `T1:T2@3` and so on.
pub fn parse_actions(s: &str) -> Result<Vec<Action>> {
    let mut actions = Vec::new();
    for part in s.split_whitespace() {
        let part_ctx = || format!("Failed to parse move part: '{part}'");
        let upper = part.to_ascii_uppercase();
        if upper == "R" {
            actions.push(Action::Redeal);
        } else if upper == "U" {
            actions.push(Action::Undo);
        } else if let Some(num_str) = upper.strip_suffix('D') {
            let num = if num_str.is_empty() {
                1
            } else {
                num_str.parse::<usize>().with_context(part_ctx)?
            };
            actions.extend(std::iter::repeat_n(Action::Draw, num));
        } else if let Some((from_str, to_part)) = upper.split_once(':') {
            let from = parse_pile_id(from_str).with_context(part_ctx)?;
            let (to_str, count) = match to_part.split_once('@') {
                Some((to_s, count_s)) => (to_s, count_s.parse::<usize>().with_context(part_ctx)?),
                None => (to_part, 1),
            };
            let to = parse_pile_id(to_str).with_context(part_ctx)?;
            actions.push(Action::Move { from, to, count });
        } else {
            bail!("Unknown move format: {}", part);
        }
    }
    Ok(actions)
}

pub fn parse_pile_id(s: &str) -> Result<PileId> {
    match s {
        "W" => return Ok(PileId::Talon),
        "S" => return Ok(PileId::Stock),
        _ => {}
    }
    if let Some(stripped) = s.strip_prefix('T') {
        let num = parse_pile_number(stripped, TOTAL_TABLEAUS)
            .with_context(|| format!("Invalid tableau index: {stripped}"))?;
        Ok(PileId::Tableau(num))
    } else if let Some(stripped) = s.strip_prefix('F') {
        let num = parse_pile_number(stripped, TOTAL_FOUNDATIONS)
            .with_context(|| format!("Invalid foundation index: {stripped}"))?;
        Ok(PileId::Foundation(num))
    } else {
        bail!("Invalid pile identifier: {}", s)
    }
}

fn parse_pile_number(s: &str, total: usize) -> Result<usize> {
    let num = s.parse::<usize>()?;
    if num == 0 || num > total {
        bail!("expected 1..={total}");
    }
    Ok(num - 1)
}

pub fn format_actions(actions: &[Action]) -> String {
    let mut list = vec![];
    let mut i = 0;
    while i < actions.len() {
        match actions[i] {
            Action::Draw => {
                let mut count = 1;
                while i + count < actions.len() && matches!(actions[i + count], Action::Draw) {
                    count += 1;
                }
                let str = if count == 1 {
                    "D".into()
                } else {
                    format!("{count}D")
                };
                list.push(str);
                i += count;
                continue;
            }
            Action::Move { from, to, count } => {
                let mut str = format!("{from}:{to}");
                if count > 1 {
                    str.push_str(&format!("@{count}"));
                }
                list.push(str);
            }
            Action::Redeal => list.push("R".into()),
            Action::Undo => list.push("U".into()),
        }
        i += 1;
    }

    let mut output = String::new();
    let max_width = list.iter().map(|s| s.len()).max().unwrap_or_default() + 1;
    for chunk in list.chunks(10) {
        for cmd in chunk {
            output.push_str(&format!("{cmd:<width$}", width = max_width));
        }
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_actions() {
        let actions = parse_actions("3D W:F1 t2:t5@3 F1:T4 R u").unwrap();
        assert_eq!(
            actions,
            vec![
                Action::Draw,
                Action::Draw,
                Action::Draw,
                Action::single(PileId::Talon, PileId::Foundation(0)),
                Action::Move {
                    from: PileId::Tableau(1),
                    to: PileId::Tableau(4),
                    count: 3
                },
                Action::single(PileId::Foundation(0), PileId::Tableau(3)),
                Action::Redeal,
                Action::Undo,
            ]
        );
        assert!(actions[6].is_redeal());
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_actions("T8:T1").is_err());
        assert!(parse_actions("F0:T1").is_err());
        assert!(parse_actions("X").is_err());
        assert!(parse_actions("T1:T2@x").is_err());
    }

    #[test]
    fn test_format_actions() {
        let actions = parse_actions("D D W:T3 T2:T5@3 U").unwrap();
        assert_eq!(format_actions(&actions), "2D      W:T3    T2:T5@3 U       \n");
    }
}
