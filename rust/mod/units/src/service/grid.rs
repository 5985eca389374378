//! Color-coded building map.
//!
//! ```text
//! GridView
//! └── TowerColumn "A"
//!     ├── FloorRow 3 → [A-301 #4CAF50] [A-302 #FFC107] ...
//!     ├── FloorRow 2
//!     └── FloorRow 1
//! ```
//!
//! Projection is read-only; renderers consume the projected view.

use std::fmt::Write as _;

use serde::Serialize;

use crate::model::{UnitState, UnitTable};

/// Towers are drawn left to right in this order; any other tower follows.
pub const TOWER_ORDER: [&str; 3] = ["A", "B", "C"];

pub const FALLBACK_COLOR: &str = "#9E9E9E";

/// Display color per state.
pub fn color_for(state: UnitState) -> &'static str {
    match state {
        UnitState::Signed => "#4CAF50",
        UnitState::Dampness => "#2196F3",
        UnitState::NoDampness => "#BDBDBD",
        UnitState::NoContact => "#FFC107",
        UnitState::Vacant => "#FFC108",
        UnitState::RefusedToSign => "#F44336",
    }
}

/// Color for a raw state label; unknown labels get [`FALLBACK_COLOR`].
pub fn color_for_label(label: &str) -> &'static str {
    UnitState::from_str(label).map(color_for).unwrap_or(FALLBACK_COLOR)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridCell {
    pub unit_id: String,
    /// Persisted state label.
    pub state: String,
    pub color: &'static str,
}

impl GridCell {
    pub fn from_label(unit_id: &str, label: &str) -> Self {
        Self {
            unit_id: unit_id.to_string(),
            state: label.to_string(),
            color: color_for_label(label),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FloorRow {
    pub floor: i64,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TowerColumn {
    pub tower: String,
    /// Top floor first.
    pub floors: Vec<FloorRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GridView {
    pub towers: Vec<TowerColumn>,
}

/// Group records by tower (display order) then floor (descending).
/// Cells on a floor keep table order.
pub fn project(table: &UnitTable) -> GridView {
    let cells = table
        .iter()
        .map(|r| (r.tower.as_str(), r.floor, GridCell::from_label(&r.unit_id, r.state.as_str())));
    project_cells(cells)
}

/// Projection over loosely typed `(tower, floor, cell)` triples.
pub fn project_cells<'a>(cells: impl IntoIterator<Item = (&'a str, i64, GridCell)>) -> GridView {
    let mut towers: Vec<TowerColumn> = Vec::new();

    for (tower, floor, cell) in cells {
        let column = match towers.iter().position(|t| t.tower == tower) {
            Some(i) => &mut towers[i],
            None => {
                towers.push(TowerColumn {
                    tower: tower.to_string(),
                    floors: Vec::new(),
                });
                let last = towers.len() - 1;
                &mut towers[last]
            }
        };
        match column.floors.iter_mut().find(|f| f.floor == floor) {
            Some(row) => row.cells.push(cell),
            None => column.floors.push(FloorRow {
                floor,
                cells: vec![cell],
            }),
        }
    }

    // Stable sort: unlisted towers keep first-seen order after A, B, C.
    towers.sort_by_key(|t| {
        TOWER_ORDER
            .iter()
            .position(|o| *o == t.tower)
            .unwrap_or(TOWER_ORDER.len())
    });
    for column in &mut towers {
        column.floors.sort_by(|a, b| b.floor.cmp(&a.floor));
    }

    GridView { towers }
}

/// Number of units per state, in declaration order.
pub fn summary(table: &UnitTable) -> Vec<(UnitState, usize)> {
    UnitState::ALL
        .iter()
        .map(|s| (*s, table.iter().filter(|r| r.state == *s).count()))
        .collect()
}

// ---------------------------------------------------------------------------
// Renderers
// ---------------------------------------------------------------------------

const GRID_CSS: &str = r#"
body { font-family: system-ui, -apple-system, sans-serif; margin: 24px; }
.depto-grid {
  display: grid;
  grid-template-columns: repeat(3, 1fr);
  gap: 16px;
  margin-top: 20px;
}
.torre { text-align: center; font-weight: bold; font-size: 20px; margin-bottom: 8px; }
.piso {
  display: flex;
  flex-wrap: wrap;
  gap: 5px;
  justify-content: center;
  margin-bottom: 12px;
}
.depto {
  width: 75px;
  height: 50px;
  border-radius: 6px;
  display: flex;
  align-items: center;
  justify-content: center;
  font-size: 12px;
  color: white;
  font-weight: bold;
}
.legend { display: flex; gap: 12px; flex-wrap: wrap; margin-top: 8px; font-size: 13px; }
.legend span { display: inline-flex; align-items: center; gap: 4px; }
.legend i { width: 14px; height: 14px; border-radius: 3px; display: inline-block; }
"#;

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Standalone HTML page: one column per tower, one row per floor.
pub fn render_html(view: &GridView) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Building map</title>\n<style>");
    html.push_str(GRID_CSS);
    html.push_str("</style>\n</head>\n<body>\n<h2>Building map</h2>\n");

    html.push_str("<div class=\"legend\">");
    for state in UnitState::ALL {
        let _ = write!(
            html,
            "<span><i style=\"background-color: {}\"></i>{}</span>",
            color_for(state),
            state.label()
        );
    }
    html.push_str("</div>\n");

    html.push_str("<div class=\"depto-grid\">\n");
    for column in &view.towers {
        html.push_str("<div>\n");
        let _ = writeln!(html, "<div class=\"torre\">{}</div>", escape_html(&column.tower));
        for row in &column.floors {
            html.push_str("<div class=\"piso\">");
            for cell in &row.cells {
                let _ = write!(
                    html,
                    "<div class=\"depto\" style=\"background-color: {}\" title=\"{}\">{}</div>",
                    cell.color,
                    escape_html(&cell.state),
                    escape_html(&cell.unit_id)
                );
            }
            html.push_str("</div>\n");
        }
        html.push_str("</div>\n");
    }
    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn marker(label: &str) -> char {
    match UnitState::from_str(label) {
        Some(UnitState::NoContact) => '.',
        Some(UnitState::Dampness) => 'H',
        Some(UnitState::Signed) => 'F',
        Some(UnitState::NoDampness) => 'S',
        Some(UnitState::RefusedToSign) => 'X',
        Some(UnitState::Vacant) => 'D',
        None => '?',
    }
}

/// Terminal rendering: a block per tower, a line per floor, then a legend.
pub fn render_text(view: &GridView) -> String {
    let mut out = String::new();
    for column in &view.towers {
        let _ = writeln!(out, "Tower {}", column.tower);
        for row in &column.floors {
            let _ = write!(out, "  {:>2} |", row.floor);
            for cell in &row.cells {
                let _ = write!(out, " {}[{}]", cell.unit_id, marker(&cell.state));
            }
            out.push('\n');
        }
        out.push('\n');
    }
    out.push_str("Legend:");
    for state in UnitState::ALL {
        let _ = write!(out, " [{}] {}", marker(state.as_str()), state.label());
    }
    out.push_str(" [?] unknown\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BuildingScheme, UnitEdit};
    use crate::service::catalog;

    fn all_vacant() -> UnitTable {
        let catalog = catalog::generate(&BuildingScheme::standard());
        let mut records = catalog.records().to_vec();
        let edit = UnitEdit {
            state: UnitState::Vacant,
            ..UnitEdit::default()
        };
        for r in &mut records {
            edit.apply_to(r);
        }
        UnitTable::new(records)
    }

    #[test]
    fn all_vacant_uses_vacant_color() {
        let view = project(&all_vacant());
        let cells: Vec<&GridCell> = view
            .towers
            .iter()
            .flat_map(|t| t.floors.iter())
            .flat_map(|f| f.cells.iter())
            .collect();
        assert_eq!(cells.len(), 128);
        assert!(cells.iter().all(|c| c.color == color_for(UnitState::Vacant)));
    }

    #[test]
    fn unknown_label_gets_fallback() {
        assert_eq!(color_for_label("pendiente"), FALLBACK_COLOR);
        assert_eq!(color_for_label(""), FALLBACK_COLOR);
        assert_eq!(color_for_label("firmó"), "#4CAF50");

        let view = project_cells(vec![("A", 1, GridCell::from_label("A-101", "???"))]);
        assert_eq!(view.towers[0].floors[0].cells[0].color, FALLBACK_COLOR);
    }

    #[test]
    fn towers_in_display_order_floors_descending() {
        let view = project(&catalog::generate(&BuildingScheme::standard()));
        let towers: Vec<&str> = view.towers.iter().map(|t| t.tower.as_str()).collect();
        assert_eq!(towers, vec!["A", "B", "C"]);
        for t in &view.towers {
            let floors: Vec<i64> = t.floors.iter().map(|f| f.floor).collect();
            assert_eq!(floors, vec![3, 2, 1]);
        }
        let a2 = &view.towers[0].floors[1];
        assert_eq!(a2.cells.len(), 18);
        assert_eq!(a2.cells[0].unit_id, "A-201");
        assert_eq!(a2.cells[17].unit_id, "A-218");
    }

    #[test]
    fn unlisted_towers_follow_in_first_seen_order() {
        let cell = |id: &str| GridCell::from_label(id, "humedad");
        let view = project_cells(vec![
            ("Z", 1, cell("Z-101")),
            ("B", 1, cell("B-101")),
            ("D", 1, cell("D-101")),
            ("A", 1, cell("A-101")),
        ]);
        let towers: Vec<&str> = view.towers.iter().map(|t| t.tower.as_str()).collect();
        assert_eq!(towers, vec!["A", "B", "Z", "D"]);
    }

    #[test]
    fn projection_does_not_touch_table() {
        let table = catalog::generate(&BuildingScheme::standard());
        let before = table.clone();
        let _ = project(&table);
        assert_eq!(table, before);
    }

    #[test]
    fn summary_counts_every_unit() {
        let counts = summary(&all_vacant());
        assert_eq!(counts.len(), 6);
        assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), 128);
        assert!(counts.contains(&(UnitState::Vacant, 128)));
    }

    #[test]
    fn html_has_a_tile_per_unit() {
        let html = render_html(&project(&all_vacant()));
        assert_eq!(html.matches("class=\"depto\"").count(), 128);
        assert!(html.contains("<div class=\"torre\">C</div>"));
        assert!(html.contains("background-color: #FFC108"));
    }

    #[test]
    fn html_escapes_values() {
        let view = project_cells(vec![("A", 1, GridCell::from_label("<b>", "x&y"))]);
        let html = render_html(&view);
        assert!(html.contains("&lt;b&gt;"));
        assert!(html.contains("x&amp;y"));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn text_rendering_marks_states() {
        let view = project_cells(vec![
            ("A", 2, GridCell::from_label("A-201", "firmó")),
            ("A", 1, GridCell::from_label("A-101", "???")),
        ]);
        let text = render_text(&view);
        assert!(text.starts_with("Tower A\n   2 | A-201[F]\n   1 | A-101[?]\n"));
        assert!(text.contains("[F] Signed"));
    }
}
