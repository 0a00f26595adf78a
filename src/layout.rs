//! Grid layout of patch groups and their jacks.
//!
//! A diagram is a list of rows; each row is a list of patch groups laid out
//! left to right. A group spans one or more jack columns. Name prefixes
//! change a group's geometry:
//!
//! - `^` mil-size: wider columns and larger jacks
//! - `*` hidden name: the label is drawn in the group's own color
//! - `$` spacer: takes up room but has no jacks
//!
//! Only geometry lives here. Labels, colors and arrows are drawn by the
//! rendering layer.

use crate::constants::{COLUMN_WIDTH, JACK_RADIUS, ROW_HEIGHT};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Extra column width of a mil-size group, as a fraction of the column width
const MIL_COLUMN_GROWTH: f64 = 0.3333;

/// Extra jack radius of a mil-size group, as a fraction of the radius
const MIL_RADIUS_GROWTH: f64 = 0.15;

/// One patch group as described by diagram data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatchGroupSpec {
    pub name: String,
    pub span: u32,
    pub color: String,
    pub description: String,
}

impl Default for PatchGroupSpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            span: 1,
            color: "white".to_string(),
            description: String::new(),
        }
    }
}

impl PatchGroupSpec {
    pub fn new(name: impl Into<String>, span: u32) -> Self {
        Self {
            name: name.into(),
            span,
            ..Self::default()
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

/// A jack produced by the layout.
#[derive(Debug, Clone, PartialEq)]
pub struct JackSlot {
    /// `row-group-column`, 1-based row and group, 0-based column
    pub key: String,
    pub center: Point,
    pub radius: f64,
}

/// A patch group placed on the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedGroup {
    pub row: usize,
    pub group: usize,
    /// Name without its prefix
    pub name: String,
    pub color: String,
    pub description: String,
    pub mil_size: bool,
    pub hidden_name: bool,
    pub spacer: bool,
    pub rect: Rect,
    pub jacks: Vec<JackSlot>,
}

/// A laid-out diagram.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DiagramLayout {
    pub groups: Vec<PlacedGroup>,
    pub bounds: Rect,
}

impl DiagramLayout {
    pub fn jacks(&self) -> impl Iterator<Item = &JackSlot> {
        self.groups.iter().flat_map(|g| g.jacks.iter())
    }

    pub fn group(&self, row: usize, group: usize) -> Option<&PlacedGroup> {
        self.groups.iter().find(|g| g.row == row && g.group == group)
    }

    /// Groups whose (prefix-stripped) name matches.
    pub fn find(&self, name: &str) -> impl Iterator<Item = &PlacedGroup> {
        self.groups.iter().filter(move |g| g.name == name)
    }
}

/// Lay out `rows` starting at the origin.
pub fn layout(rows: &[Vec<PatchGroupSpec>]) -> DiagramLayout {
    let mut groups = Vec::new();
    let mut widest: f64 = 0.0;
    let mut y = 0.0;

    for (row_index, row) in rows.iter().enumerate() {
        let mut x = 0.0;
        for (group_index, spec) in row.iter().enumerate() {
            let placed = place_group(spec, row_index + 1, group_index + 1, Point::new(x, y));
            x += placed.rect.width();
            groups.push(placed);
        }
        widest = widest.max(x);
        y += ROW_HEIGHT;
    }

    DiagramLayout {
        groups,
        bounds: Rect::new(0.0, 0.0, widest, y),
    }
}

fn place_group(spec: &PatchGroupSpec, row: usize, group: usize, origin: Point) -> PlacedGroup {
    let mil_size = spec.name.starts_with('^');
    let hidden_name = spec.name.starts_with('*');
    let spacer = spec.name.starts_with('$');
    let name = spec
        .name
        .strip_prefix(['^', '*', '$'])
        .unwrap_or(&spec.name)
        .to_string();

    let mil = if mil_size { 1.0 } else { 0.0 };
    let column_width = COLUMN_WIDTH + mil * COLUMN_WIDTH * MIL_COLUMN_GROWTH;
    let width = column_width * f64::from(spec.span);
    let radius = JACK_RADIUS + mil * JACK_RADIUS * MIL_RADIUS_GROWTH;

    let jacks = if spacer {
        Vec::new()
    } else {
        (0..spec.span)
            .map(|column| {
                let column_x = origin.x + column_width * f64::from(column);
                JackSlot {
                    key: format!("{row}-{group}-{column}"),
                    center: Point::new(
                        column_x + 1.25 * JACK_RADIUS + mil * JACK_RADIUS * MIL_COLUMN_GROWTH,
                        origin.y + ROW_HEIGHT - 1.25 * JACK_RADIUS,
                    ),
                    radius,
                }
            })
            .collect()
    };

    PlacedGroup {
        row,
        group,
        name,
        color: spec.color.clone(),
        description: spec.description.clone(),
        mil_size,
        hidden_name,
        spacer,
        rect: Rect::new(origin.x, origin.y, origin.x + width, origin.y + ROW_HEIGHT),
        jacks,
    }
}

/// Bounding box of several rectangles, `None` for an empty input.
pub fn aggregate_rect<I>(rects: I) -> Option<Rect>
where
    I: IntoIterator<Item = Rect>,
{
    rects.into_iter().reduce(|acc, r| acc.union(r))
}
