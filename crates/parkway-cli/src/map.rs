//! Text rendering of the lot
//!
//! The entrance sits above `P1` and the spots fill a 3x3 grid:
//!
//! ```text
//! {E1}
//!  |
//! [P1] -- [P2] -- (P3)
//!  |       |       |
//! [P4] -- [P5] -- [P6]
//!  |       |       |
//! [P7] -- [P8] -- [P9]
//! ```
//!
//! Free spots are drawn in brackets, occupied ones in parentheses, and the
//! edges of a route are drawn with heavier glyphs.

use std::fmt;

use parkway::prelude::*;

/// Horizontal distance between two grid columns
const COLUMN_STRIDE: usize = 8;

/// Vertical distance between two grid rows
const ROW_STRIDE: usize = 2;

/// Glyph sets for the map
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum MapStyle {
    Ascii,
    #[default]
    Unicode,
}

struct Glyphs {
    horizontal: char,
    vertical: char,
    route_horizontal: char,
    route_vertical: char,
}

impl MapStyle {
    fn glyphs(self) -> Glyphs {
        match self {
            MapStyle::Ascii => Glyphs {
                horizontal: '-',
                vertical: '|',
                route_horizontal: '=',
                route_vertical: '#',
            },
            MapStyle::Unicode => Glyphs {
                horizontal: '─',
                vertical: '│',
                route_horizontal: '━',
                route_vertical: '┃',
            },
        }
    }
}

/// Character grid the map is drawn on
#[derive(Debug, Clone, Default)]
struct Grid {
    rows: Vec<Vec<char>>,
}

impl Grid {
    fn set_char(&mut self, x: usize, y: usize, c: char) {
        if self.rows.len() <= y {
            self.rows.resize_with(y + 1, Vec::new);
        }
        let row = &mut self.rows[y];
        if row.len() <= x {
            row.resize(x + 1, ' ');
        }
        row[x] = c;
    }

    fn draw_text(&mut self, x: usize, y: usize, text: &str) {
        for (i, c) in text.chars().enumerate() {
            self.set_char(x + i, y, c);
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self
            .rows
            .iter()
            .map(|row| row.iter().collect::<String>().trim_end().to_string())
            .collect();
        write!(f, "{}", lines.join("\n"))
    }
}

/// Grid cell of a node: `(column, row)`, with the entrance on row 0
///
/// Only the standard lot has a layout; other identifiers are not drawn.
pub fn cell(node: &str) -> Option<(usize, usize)> {
    if node == ENTRANCE {
        return Some((0, 0));
    }
    let n: usize = node.strip_prefix('P')?.parse().ok()?;
    (1..=9)
        .contains(&n)
        .then(|| ((n - 1) % 3, 1 + (n - 1) / 3))
}

/// Renders the lot, optionally with a highlighted route
pub struct LotMap<'a> {
    records: &'a [SpotRecord],
    edges: &'a [Edge],
    route: Option<&'a [NodeId]>,
    style: MapStyle,
}

impl<'a> LotMap<'a> {
    pub fn new<C: Clock>(lot: &'a ParkingService<C>, style: MapStyle) -> Self {
        Self {
            records: lot.spots(),
            edges: lot.graph().edges(),
            route: None,
            style,
        }
    }

    /// Highlight the connections along `path`
    pub fn with_route(mut self, path: &'a [NodeId]) -> Self {
        self.route = Some(path);
        self
    }

    fn on_route(&self, edge: &Edge) -> bool {
        self.route.is_some_and(|path| {
            path.windows(2)
                .any(|pair| edge.joins(pair[0].as_str(), pair[1].as_str()))
        })
    }

    fn draw_edges(&self, grid: &mut Grid) {
        let glyphs = self.style.glyphs();
        for edge in self.edges {
            let (Some(a), Some(b)) = (cell(edge.from.as_str()), cell(edge.to.as_str())) else {
                continue;
            };
            let highlighted = self.on_route(edge);
            let ((c1, r1), (c2, r2)) = if a <= b { (a, b) } else { (b, a) };

            if r1 == r2 && c2 == c1 + 1 {
                let c = if highlighted {
                    glyphs.route_horizontal
                } else {
                    glyphs.horizontal
                };
                let x = c1 * COLUMN_STRIDE + 5;
                grid.set_char(x, r1 * ROW_STRIDE, c);
                grid.set_char(x + 1, r1 * ROW_STRIDE, c);
            } else if c1 == c2 && r2 == r1 + 1 {
                let c = if highlighted {
                    glyphs.route_vertical
                } else {
                    glyphs.vertical
                };
                grid.set_char(c1 * COLUMN_STRIDE + 1, r1 * ROW_STRIDE + 1, c);
            }
        }
    }

    fn draw_nodes(&self, grid: &mut Grid) {
        grid.draw_text(0, 0, &format!("{{{}}}", ENTRANCE));
        for record in self.records {
            let Some((col, row)) = cell(record.spot.as_str()) else {
                continue;
            };
            let label = if record.is_occupied() {
                format!("({})", record.spot)
            } else {
                format!("[{}]", record.spot)
            };
            grid.draw_text(col * COLUMN_STRIDE, row * ROW_STRIDE, &label);
        }
    }

    fn legend(&self) -> String {
        let route = self.style.glyphs().route_horizontal;
        format!(
            "{{{}}} entrance  [P] free  (P) occupied  {}{} route",
            ENTRANCE, route, route
        )
    }

    pub fn render(&self) -> String {
        let mut grid = Grid::default();
        self.draw_edges(&mut grid);
        self.draw_nodes(&mut grid);
        format!("{}\n\n{}", grid, self.legend())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(map: &str) -> Vec<&str> {
        map.lines().collect()
    }

    #[test]
    fn test_cells() {
        assert_eq!(cell("E1"), Some((0, 0)));
        assert_eq!(cell("P1"), Some((0, 1)));
        assert_eq!(cell("P6"), Some((2, 2)));
        assert_eq!(cell("P9"), Some((2, 3)));
        assert_eq!(cell("P0"), None);
        assert_eq!(cell("P10"), None);
        assert_eq!(cell("X1"), None);
    }

    #[test]
    fn test_empty_lot_ascii() {
        let lot = ParkingService::new().unwrap();
        let map = LotMap::new(&lot, MapStyle::Ascii).render();
        let rows = lines(&map);
        assert_eq!(rows[0], "{E1}");
        assert_eq!(rows[1], " |");
        assert_eq!(rows[2], "[P1] -- [P2] -- [P3]");
        assert_eq!(rows[3], " |       |       |");
        assert_eq!(rows[4], "[P4] -- [P5] -- [P6]");
        assert_eq!(rows[6], "[P7] -- [P8] -- [P9]");
        assert_eq!(rows[7], "");
        assert!(rows[8].contains("occupied"));
    }

    #[test]
    fn test_occupied_spots_use_parentheses() {
        let mut lot = ParkingService::new().unwrap();
        lot.add_car("ABC123", "P5").unwrap();
        let map = LotMap::new(&lot, MapStyle::Ascii).render();
        assert_eq!(lines(&map)[4], "[P4] -- (P5) -- [P6]");
    }

    #[test]
    fn test_route_is_highlighted() {
        let mut lot = ParkingService::new().unwrap();
        lot.add_car("ABC123", "P3").unwrap();
        let report = lot.search_car("ABC123");
        let map = LotMap::new(&lot, MapStyle::Ascii)
            .with_route(&report.path)
            .render();
        let rows = lines(&map);
        assert_eq!(rows[1], " #");
        assert_eq!(rows[2], "[P1] == [P2] == (P3)");
        assert_eq!(rows[3], " |       |       |");
    }

    #[test]
    fn test_unicode_glyphs() {
        let lot = ParkingService::new().unwrap();
        let route = lot.route("E1", "P4");
        let map = LotMap::new(&lot, MapStyle::Unicode)
            .with_route(&route.path)
            .render();
        let rows = lines(&map);
        assert_eq!(rows[1], " ┃");
        assert_eq!(rows[2], "[P1] ── [P2] ── [P3]");
        assert_eq!(rows[3], " ┃       │       │");
        assert!(rows[8].contains("━━ route"));
    }
}
