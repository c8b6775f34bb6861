use super::state::{AppState, ResultRow};
use super::ViewState;
use crate::engine::Grade;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

/// Terminal mapping of the per-grade palette (purples for A's, teals for
/// B's, reds for C's).
pub fn grade_color(grade: Grade) -> Color {
    match grade {
        Grade::APlus => Color::Magenta,
        Grade::A => Color::LightMagenta,
        Grade::BPlus => Color::Cyan,
        Grade::B => Color::LightCyan,
        Grade::CPlus => Color::Red,
        Grade::C => Color::LightRed,
        Grade::D => Color::Yellow,
        Grade::Na => Color::DarkGray,
    }
}

pub fn draw(f: &mut Frame, state: &AppState, view: &ViewState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(9),
            Constraint::Length(6),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, state, chunks[0]);
    draw_results(f, state, view, chunks[1]);
    draw_breakdown(f, state, view, chunks[2]);
    draw_logs(f, state, chunks[3]);
    draw_footer(f, chunks[4]);
}

fn draw_header(f: &mut Frame, state: &AppState, area: Rect) {
    let status = if state.fetching {
        Span::styled("fetching…", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(
            format!("{} games", state.rows.len()),
            Style::default().fg(Color::Green),
        )
    };
    let line = Line::from(vec![
        Span::styled(
            " COURTSIDE ",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("│ {} │ ", state.game_date)),
        status,
        Span::raw(format!(" │ up {}", state.uptime())),
    ]);
    let header = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn format_row(row: &ResultRow) -> Row<'_> {
    let grade_style = Style::default()
        .fg(grade_color(row.grade))
        .add_modifier(Modifier::BOLD);
    Row::new(vec![
        Cell::from(row.game_id.clone()),
        Cell::from(row.game_date.clone()),
        Cell::from(row.teams.clone()),
        Cell::from(format!("{:.2}", row.period_scores)),
        Cell::from(format!("{:.2}", row.extra_periods)),
        Cell::from(format!("{:.2}", row.lead_changes)),
        Cell::from(format!("{:.2}", row.buzzer_beater)),
        Cell::from(format!("{:.2}", row.fg3_pct)),
        Cell::from(format!("{:.2}", row.star_performance)),
        Cell::from(format!("{:.2}", row.margin)),
        Cell::from(format!("{:.2}", row.total_score)),
        Cell::from(row.grade.to_string()).style(grade_style),
        Cell::from(format!("{:.2}", row.average_margin)),
    ])
}

fn draw_results(f: &mut Frame, state: &AppState, view: &ViewState, area: Rect) {
    let header = Row::new(vec![
        "ID", "Date", "Teams", "Per", "OT", "Lead", "Buzz", "3PT", "Star", "Marg", "Total",
        "Grade", "AvgM",
    ])
    .style(Style::default().add_modifier(Modifier::BOLD));

    let ordered = view.ordered(&state.rows);
    let rows: Vec<Row> = ordered
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let table_row = format_row(row);
            if i == view.selected {
                table_row.style(Style::default().add_modifier(Modifier::REVERSED))
            } else {
                table_row
            }
        })
        .collect();

    let widths = [
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(5),
        Constraint::Length(6),
        Constraint::Length(5),
        Constraint::Length(5),
    ];
    let title = format!(" Games (sort: {}) ", view.sort.label());
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(table, area);
}

/// Proportional bar for one sub-score against its ceiling.
fn metric_line(label: &str, value: f64, ceiling: f64, color: Color) -> Line<'static> {
    const BAR_WIDTH: usize = 20;
    let fill = if ceiling > 0.0 {
        ((value / ceiling).clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize
    } else {
        0
    };
    Line::from(vec![
        Span::raw(format!("{:<12}", label)),
        Span::styled("█".repeat(fill), Style::default().fg(color)),
        Span::raw("░".repeat(BAR_WIDTH - fill)),
        Span::raw(format!(" {:.2}/{:.2}", value, ceiling)),
    ])
}

fn draw_breakdown(f: &mut Frame, state: &AppState, view: &ViewState, area: Rect) {
    let ordered = view.ordered(&state.rows);
    let block = Block::default().borders(Borders::ALL).title(" Breakdown ");
    let Some(row) = ordered.get(view.selected) else {
        f.render_widget(Paragraph::new("no game selected").block(block), area);
        return;
    };

    let ceilings = &view.ceilings;
    let lines = vec![
        Line::from(vec![
            Span::styled(
                row.teams.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "  total {:.2}  grade ",
                row.total_score
            )),
            Span::styled(
                row.grade.to_string(),
                Style::default()
                    .fg(grade_color(row.grade))
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "  lead changes {}  top scorer {} pts",
                row.lead_change_count, row.max_points
            )),
        ]),
        metric_line("Periods", row.period_scores, ceilings.period, Color::Magenta),
        metric_line("Overtime", row.extra_periods, ceilings.extra_period, Color::Cyan),
        metric_line("Lead chg", row.lead_changes, ceilings.lead_change, Color::Red),
        metric_line("Buzzer", row.buzzer_beater, ceilings.buzzer_beater, Color::LightCyan),
        metric_line("Shooting", row.fg3_pct, ceilings.fg3_pct, Color::LightGreen),
        metric_line("Stars", row.star_performance, ceilings.star, Color::LightMagenta),
        metric_line("Margin", row.margin, ceilings.margin, Color::Blue),
    ];
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_logs(f: &mut Frame, state: &AppState, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = state
        .logs
        .iter()
        .rev()
        .take(visible)
        .rev()
        .map(|entry| {
            let level_color = match entry.level.as_str() {
                "warn" => Color::Yellow,
                "error" => Color::Red,
                _ => Color::DarkGray,
            };
            Line::from(vec![
                Span::styled(format!("{} ", entry.time), Style::default().fg(Color::DarkGray)),
                Span::styled(format!("{:<5} ", entry.level), Style::default().fg(level_color)),
                Span::raw(entry.message.clone()),
            ])
        })
        .collect();
    let logs = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Log "));
    f.render_widget(logs, area);
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new(" q quit │ r refresh │ s sort │ ↑/↓ select")
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(footer, area);
}
