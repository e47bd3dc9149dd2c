use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};

use namematch_cli::diffview::inline_markup;
use namematch_cli::session::Session;
use namematch_core::{ScoreBreakdown, char_diff};
use namematch_model::{
    DiffAlgorithm, DiffResult, MatchCandidate, MatchLevel, SelectionState, SourceResult,
};

use crate::cli::DisplayArgs;

pub fn print_session(session: &Session, display: &DisplayArgs) {
    let algorithm = display.show_diff.then(|| DiffAlgorithm::from(display.algorithm));
    let mut table = Table::new();
    let mut header = vec![
        header_cell("#"),
        header_cell("Source"),
        header_cell("Match"),
        header_cell("Score"),
        header_cell("State"),
        header_cell("Other candidates"),
    ];
    if algorithm.is_some() {
        header.push(header_cell("Diff"));
    }
    table.set_header(header);
    apply_results_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Center);

    for result in &session.results {
        table.add_row(result_row(session, result, display.top, algorithm));
    }
    println!("{table}");
    print_totals(session);
}

pub fn print_entry(session: &Session, source_index: usize, changed: bool) {
    let Some(result) = session.results.get(source_index) else {
        return;
    };
    let state = session.selections.state(source_index);
    let verb = if changed { "now" } else { "still" };
    match state.candidate() {
        Some(candidate) => println!(
            "{}. {} is {verb} {} -> {} ({}%)",
            source_index + 1,
            result.source_text,
            state.label(),
            candidate.target_text,
            candidate.percent()
        ),
        None => println!(
            "{}. {} is {verb} {}",
            source_index + 1,
            result.source_text,
            state.label()
        ),
    }
}

pub fn print_score(breakdown: &ScoreBreakdown, source: &str, target: &str) {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Measure"), header_cell("Value")]);
    apply_results_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    table.add_row(vec![Cell::new("Source (prepared)"), Cell::new(&breakdown.prepared_source)]);
    table.add_row(vec![Cell::new("Target (prepared)"), Cell::new(&breakdown.prepared_target)]);
    table.add_row(vec![Cell::new("Edit similarity"), percent_cell(breakdown.edit)]);
    table.add_row(vec![Cell::new("Jaro-Winkler"), percent_cell(breakdown.phonetic)]);
    table.add_row(vec![
        Cell::new("Fused score").add_attribute(Attribute::Bold),
        score_cell(breakdown.score).add_attribute(Attribute::Bold),
    ]);
    println!("{source} <> {target}");
    println!("{table}");
    println!("{}", breakdown.explain());
}

pub fn print_diff(diff: &DiffResult, algorithm: DiffAlgorithm) {
    println!("{}", inline_markup(diff));
    println!(
        "{algorithm}: {} unchanged, {} added, {} removed, similarity {:.0}%",
        diff.unchanged,
        diff.added,
        diff.removed,
        diff.ratio * 100.0
    );
}

fn result_row(
    session: &Session,
    result: &SourceResult,
    top: usize,
    algorithm: Option<DiffAlgorithm>,
) -> Vec<Cell> {
    let state = session.selections.state(result.source_index);
    let effective = session.selections.effective_match(result);
    let mut row = vec![
        dim_cell(result.source_index + 1),
        Cell::new(&result.source_text),
        match effective {
            Some(candidate) => Cell::new(&candidate.target_text),
            None => dim_cell("no match"),
        },
        effective.map_or_else(|| dim_cell("-"), |c| score_cell(c.score)),
        state_cell(state),
        others_cell(result, effective, top),
    ];
    if let Some(algorithm) = algorithm {
        row.push(match effective {
            Some(candidate) => Cell::new(inline_markup(&char_diff(
                &result.source_text,
                &candidate.target_text,
                algorithm,
            ))),
            None => dim_cell("-"),
        });
    }
    row
}

fn others_cell(result: &SourceResult, effective: Option<&MatchCandidate>, top: usize) -> Cell {
    let others: Vec<String> = result
        .candidates
        .iter()
        .filter(|c| effective.is_none_or(|e| e.target_index != c.target_index))
        .take(top.saturating_sub(1))
        .map(|c| format!("{} ({}%)", c.target_text, c.percent()))
        .collect();
    if others.is_empty() {
        dim_cell("-")
    } else {
        Cell::new(others.join("\n"))
    }
}

fn print_totals(session: &Session) {
    let summary = session.summary();
    println!(
        "{} sources: {} locked, {} selected, {} without a match",
        summary.total, summary.locked, summary.temp_selected, summary.unmatched
    );
    if session.partial {
        println!("Run stopped early; results are partial.");
    }
}

fn apply_results_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
    if table.column_count() >= 6 {
        table.set_constraints(vec![
            ColumnConstraint::UpperBoundary(Width::Fixed(6)),
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
            ColumnConstraint::UpperBoundary(Width::Percentage(30)),
            ColumnConstraint::LowerBoundary(Width::Fixed(6)),
            ColumnConstraint::LowerBoundary(Width::Fixed(10)),
        ]);
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn level_color(level: MatchLevel) -> Color {
    match level {
        MatchLevel::Exact => Color::Green,
        MatchLevel::Similar => Color::DarkGreen,
        MatchLevel::Medium => Color::Yellow,
        MatchLevel::Low => Color::Red,
    }
}

fn score_cell(score: f64) -> Cell {
    let level = MatchLevel::from_score(score);
    let cell = Cell::new(percent_text(score)).fg(level_color(level));
    if level == MatchLevel::Exact {
        cell.add_attribute(Attribute::Bold)
    } else {
        cell
    }
}

fn percent_cell(value: f64) -> Cell {
    Cell::new(percent_text(value))
}

fn percent_text(value: f64) -> String {
    format!("{}%", (value * 100.0).round())
}

fn state_cell(state: &SelectionState) -> Cell {
    match state {
        SelectionState::Locked(_) => Cell::new("locked")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        SelectionState::TempSelected(_) => Cell::new("selected").fg(Color::Yellow),
        SelectionState::Unselected => dim_cell("-"),
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
