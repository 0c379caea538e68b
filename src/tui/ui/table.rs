use crate::cards::{Card, Face, JokerColor, Suit};
use crate::game::{Phase, PlayerState, HUMAN, PLAYER_NAMES};
use crate::tui::app::AppState;
use ratatui::prelude::*;
use ratatui::widgets::*;

use super::layout::{centered_rect, inner, quadrants};

pub(super) fn draw_table(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),  // header
            Constraint::Min(12),    // seats
            Constraint::Length(10), // log
            Constraint::Length(3),  // status bar
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);

    // CPUs across the top and left, the human bottom-right
    let seats = quadrants(chunks[1]);
    for (idx, player) in app.state().players().iter().enumerate() {
        render_player_panel(f, seats[idx], app, idx, player);
    }

    draw_log(f, app, chunks[2]);
    draw_status(f, app, chunks[3]);

    if app.help_open() {
        draw_help(f);
    }
}

fn draw_header(f: &mut Frame, app: &AppState, area: Rect) {
    let state = app.state();
    let selected = state.human().selected().len();
    let instruction = match state.phase() {
        Phase::Discard => format!(
            "Discard phase: select up to 2 cards ({selected}/2), \
             D to discard, S to skip, A for a hint"
        ),
        Phase::Hand => {
            format!("Hand phase: select exactly 5 cards ({selected}/5), Enter to score")
        }
    };
    let lines = vec![
        Line::from(Span::styled(
            format!("Round {}  Phase: {}", state.round(), state.phase()),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(instruction),
    ];
    let title = format!("solotro v{}", crate::VERSION);
    let header = Paragraph::new(lines).block(Block::default().title(title).borders(Borders::ALL));
    f.render_widget(header, area);
}

fn render_player_panel(f: &mut Frame, area: Rect, app: &AppState, idx: usize, p: &PlayerState) {
    let is_human = idx == HUMAN;
    let title = format!("{} · {} pts", PLAYER_NAMES[idx], p.score());
    let mut block = Block::default().title(title).borders(Borders::ALL);
    if is_human {
        block = block.border_style(Style::default().fg(Color::Cyan));
    }
    f.render_widget(block, area);

    let dim = Style::default().add_modifier(Modifier::DIM);
    let mut hand_spans: Vec<Span> = vec![Span::raw(format!("Hand ({}): ", p.hand().len()))];
    for (pos, card) in p.hand().iter().enumerate() {
        let mut style = card_style(*card);
        if is_human && p.is_selected(card.id()) {
            style = style.add_modifier(Modifier::REVERSED);
        }
        if is_human && pos == app.cursor {
            style = style.add_modifier(Modifier::UNDERLINED | Modifier::BOLD);
        }
        hand_spans.push(Span::styled(short_label(*card), style));
        hand_spans.push(Span::raw(" "));
    }

    let mut lines = vec![Line::from(hand_spans)];
    match p.last_result() {
        Some(r) => {
            lines.push(Line::from(format!("Last: {} ({} pts)", r.name(), r.score)));
            let formula = Span::styled(r.formula.clone(), dim);
            lines.push(Line::from(vec![Span::raw("Formula: "), formula]));
        }
        None => {
            lines.push(Line::from(vec![Span::raw("Last: "), Span::styled("none", dim)]));
            lines.push(Line::from(vec![Span::raw("Formula: "), Span::styled("-", dim)]));
        }
    }
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(para, inner(area));
}

fn draw_log(f: &mut Frame, app: &AppState, area: Rect) {
    let block = Block::default().title("Log").borders(Borders::ALL);
    let rows = usize::from(inner(area).height);
    // newest first
    let lines: Vec<Line> =
        app.state().log().iter().rev().take(rows).map(|l| Line::from(l.as_str())).collect();
    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, area);
}

fn draw_status(f: &mut Frame, app: &AppState, area: Rect) {
    f.render_widget(Block::default().borders(Borders::ALL).title("Status"), area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(inner(area));
    let left = match app.notice() {
        Some(text) => {
            Line::from(Span::styled(text.to_string(), Style::default().fg(Color::Yellow)))
        }
        None => Line::from(""),
    };
    f.render_widget(Paragraph::new(left), cols[0]);
    let right = Paragraph::new("? help • N new • R reset • Q quit").alignment(Alignment::Right);
    f.render_widget(right, cols[1]);
}

fn draw_help(f: &mut Frame) {
    let area = centered_rect(60, 70, f.area());
    let block = Block::default().title("Help").borders(Borders::ALL);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(Span::styled("Cards:", bold)),
        Line::from("- Left / Right: move cursor"),
        Line::from("- Space: select / deselect card"),
        Line::from(""),
        Line::from(Span::styled("Discard phase:", bold)),
        Line::from("- D: discard selected (up to 2)"),
        Line::from("- S: skip discard"),
        Line::from("- A: suggest a discard"),
        Line::from(""),
        Line::from(Span::styled("Hand phase:", bold)),
        Line::from("- Enter: score the 5 selected cards (one joker at most)"),
        Line::from(""),
        Line::from(Span::styled("Game:", bold)),
        Line::from("- N: new game"),
        Line::from("- R: reset and delete the save file"),
        Line::from("- Q: quit"),
        Line::from(""),
        Line::from("Every 4th round you lose 300/250/200/150 points by rank."),
        Line::from("Close help: ? or Esc"),
    ];
    let para = Paragraph::new(lines).wrap(Wrap { trim: true });
    f.render_widget(Clear, area);
    f.render_widget(block, area);
    f.render_widget(para, inner(area));
}

fn suit_style(s: Suit) -> Style {
    match s {
        Suit::Hearts | Suit::Diamonds => Style::default().fg(Color::Red),
        Suit::Spades | Suit::Clubs => Style::default().fg(Color::White),
    }
}

fn card_style(card: Card) -> Style {
    match card.face() {
        Face::Plain(c) => suit_style(c.suit()),
        Face::Joker(JokerColor::Red) => {
            Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD)
        }
        Face::Joker(JokerColor::Black) => {
            Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD)
        }
    }
}

fn short_label(card: Card) -> String {
    match card.face() {
        Face::Plain(c) => c.to_string(),
        Face::Joker(JokerColor::Red) => "RJ".to_string(),
        Face::Joker(JokerColor::Black) => "BJ".to_string(),
    }
}
