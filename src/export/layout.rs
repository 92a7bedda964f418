//! Page layout for the exported schedule.
//!
//! Everything here is measured in millimetres on an A4 page with the origin
//! at the top-left corner and `y` growing downwards. The renderer flips the
//! axis when it writes the PDF.
//!
//! Text is drawn with the PDF builtin fonts, which only encode WinAnsi
//! (Windows-1252). Other characters are dropped before measuring so that
//! centring and truncation match what ends up on the page.

use crate::models::{Day, Schedule};

pub const PAGE_WIDTH: f32 = 210.0;
pub const PAGE_HEIGHT: f32 = 297.0;
pub const MARGIN: f32 = 20.0;
/// Cursor position where content starts when there is no logo.
pub const DEFAULT_CONTENT_TOP: f32 = 40.0;
/// Once the cursor passes this line after a table, the next day starts a new page.
pub const PAGE_BREAK_Y: f32 = 250.0;
/// No table row may extend past this line.
pub const BOTTOM_LIMIT: f32 = PAGE_HEIGHT - 10.0;

pub const TITLE_SIZE: f32 = 20.0;
pub const DATE_SIZE: f32 = 12.0;
pub const HEADING_SIZE: f32 = 16.0;
pub const CELL_SIZE: f32 = 11.0;

pub const ROW_HEIGHT: f32 = 8.0;
const HEADING_TO_TABLE: f32 = 10.0;
const AFTER_TABLE: f32 = 20.0;
const CELL_PADDING: f32 = 2.0;

const LOGO_TOP: f32 = 10.0;
const LOGO_MAX_WIDTH: f32 = 30.0;
const LOGO_MAX_HEIGHT: f32 = 25.0;
const LOGO_GAP: f32 = 5.0;

pub const COLUMNS: [&str; 4] = ["Exercise", "Sets", "Rest", "Video"];
pub const COLUMN_WIDTHS: [f32; 4] = [50.0, 30.0, 25.0, 65.0];

const PT_TO_MM: f32 = 0.352_778;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Area {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Area {
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[cfg(test)]
    pub fn contains(&self, other: &Area) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x + other.width <= self.x + self.width
            && other.bottom() <= self.bottom()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Element {
    /// `y` is the text baseline.
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        bold: bool,
    },
    CellBorder(Area),
    Logo(Area),
    Link {
        area: Area,
        url: String,
    },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    pub elements: Vec<Element>,
}

impl Page {
    #[cfg(test)]
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.elements.iter().filter_map(|e| match e {
            Element::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn links(&self) -> impl Iterator<Item = (&Area, &str)> {
        self.elements.iter().filter_map(|e| match e {
            Element::Link { area, url } => Some((area, url.as_str())),
            _ => None,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TableCell {
    /// Full cell value; the drawn text may be shortened to fit.
    pub text: String,
    pub page: usize,
    pub area: Area,
}

impl TableCell {
    pub fn is_link(&self) -> bool {
        self.text.starts_with("http")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

/// One day's table.
#[derive(Clone, Debug, PartialEq)]
pub struct TableBlock {
    pub day: String,
    pub heading_y: f32,
    pub rows: Vec<TableRow>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DocumentLayout {
    pub pages: Vec<Page>,
    pub tables: Vec<TableBlock>,
}

impl DocumentLayout {
    pub fn link_count(&self) -> usize {
        self.pages.iter().map(|p| p.links().count()).sum()
    }
}

/// Pixel size of the header logo, when one was loaded.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogoSize {
    pub width_px: u32,
    pub height_px: u32,
}

impl LogoSize {
    /// Area on the page that keeps the image's aspect ratio inside the logo box.
    pub fn area(&self) -> Area {
        let w = self.width_px.max(1) as f32;
        let h = self.height_px.max(1) as f32;
        let scale = (LOGO_MAX_WIDTH / w).min(LOGO_MAX_HEIGHT / h);
        Area {
            x: MARGIN,
            y: LOGO_TOP,
            width: w * scale,
            height: h * scale,
        }
    }
}

fn is_win_ansi(c: char) -> bool {
    matches!(c, ' '..='~' | '\u{A0}'..='\u{FF}')
        || "€‚ƒ„…†‡ˆ‰Š‹ŒŽ‘’“”•–—˜™š›œžŸ".contains(c)
}

/// Drops characters the builtin fonts cannot encode.
pub fn printable(text: &str) -> String {
    text.chars().filter(|&c| is_win_ansi(c)).collect()
}

fn char_width(size: f32, bold: bool) -> f32 {
    let em = if bold { 0.56 } else { 0.5 };
    size * PT_TO_MM * em
}

/// Approximate rendered width of `text` in Helvetica at `size` points.
pub fn text_width(text: &str, size: f32, bold: bool) -> f32 {
    text.chars().filter(|&c| is_win_ansi(c)).count() as f32 * char_width(size, bold)
}

fn fit_text(text: &str, size: f32, max_width: f32) -> String {
    let text = printable(text);
    let fits = (max_width / char_width(size, false)).floor() as usize;
    if text.chars().count() <= fits {
        return text;
    }
    if fits < 3 {
        return String::new();
    }
    text.chars().take(fits - 3).collect::<String>() + "..."
}

struct Writer {
    done: Vec<Page>,
    page: Page,
    y: f32,
}

impl Writer {
    fn new() -> Self {
        Writer {
            done: Vec::new(),
            page: Page::default(),
            y: DEFAULT_CONTENT_TOP,
        }
    }

    fn page_index(&self) -> usize {
        self.done.len()
    }

    fn new_page(&mut self) {
        self.done.push(std::mem::take(&mut self.page));
        self.y = MARGIN;
    }

    fn text(&mut self, text: impl Into<String>, x: f32, y: f32, size: f32, bold: bool) {
        self.page.elements.push(Element::Text {
            text: printable(&text.into()),
            x,
            y,
            size,
            bold,
        });
    }

    fn header(&mut self, schedule: &Schedule, logo: Option<LogoSize>) {
        let mut text_x = MARGIN;
        self.y = DEFAULT_CONTENT_TOP;
        if let Some(logo) = logo {
            let area = logo.area();
            self.page.elements.push(Element::Logo(area));
            text_x = area.x + area.width + LOGO_GAP;
            self.y = (area.bottom() + 10.0).max(DEFAULT_CONTENT_TOP);
        }
        self.text(schedule.display_title(), text_x, 20.0, TITLE_SIZE, true);
        self.text(
            format!("Start date: {}", schedule.start_date.format("%Y-%m-%d")),
            text_x,
            28.0,
            DATE_SIZE,
            false,
        );
    }

    fn cell(&mut self, area: Area, value: &str, bold: bool) {
        self.page.elements.push(Element::CellBorder(area));
        let shown = fit_text(value, CELL_SIZE, area.width - 2.0 * CELL_PADDING);
        if !shown.is_empty() {
            self.text(
                shown,
                area.x + CELL_PADDING,
                area.y + ROW_HEIGHT - 2.5,
                CELL_SIZE,
                bold,
            );
        }
    }

    fn row_areas(y: f32) -> [Area; 4] {
        let mut x = MARGIN;
        COLUMN_WIDTHS.map(|width| {
            let area = Area {
                x,
                y,
                width,
                height: ROW_HEIGHT,
            };
            x += width;
            area
        })
    }

    fn header_row(&mut self, y: f32) {
        for (area, title) in Self::row_areas(y).into_iter().zip(COLUMNS) {
            self.cell(area, title, true);
        }
    }

    fn day(&mut self, day: &Day) -> TableBlock {
        let heading_y = self.y;
        let width = text_width(&day.name, HEADING_SIZE, true);
        let x = ((PAGE_WIDTH - width) / 2.0).max(MARGIN);
        self.text(day.name.clone(), x, heading_y, HEADING_SIZE, true);

        let mut y = heading_y + HEADING_TO_TABLE;
        self.header_row(y);
        y += ROW_HEIGHT;

        let mut rows = Vec::with_capacity(day.exercises.len());
        for exercise in &day.exercises {
            if y + ROW_HEIGHT > BOTTOM_LIMIT {
                self.new_page();
                y = MARGIN;
                self.header_row(y);
                y += ROW_HEIGHT;
            }
            let mut cells = Vec::with_capacity(COLUMNS.len());
            for (area, value) in Self::row_areas(y).into_iter().zip(exercise.cells()) {
                self.cell(area, value, false);
                let cell = TableCell {
                    text: value.to_string(),
                    page: self.page_index(),
                    area,
                };
                if cell.is_link() {
                    self.page.elements.push(Element::Link {
                        area,
                        url: cell.text.clone(),
                    });
                }
                cells.push(cell);
            }
            rows.push(TableRow { cells });
            y += ROW_HEIGHT;
        }

        self.y = y;
        TableBlock {
            day: day.name.clone(),
            heading_y,
            rows,
        }
    }

    fn finish(mut self) -> Vec<Page> {
        self.done.push(self.page);
        self.done
    }
}

/// Lays out the whole schedule: header band, then one heading and table per day.
pub fn layout_schedule(schedule: &Schedule, logo: Option<LogoSize>) -> DocumentLayout {
    let mut writer = Writer::new();
    writer.header(schedule, logo);

    let mut tables = Vec::with_capacity(schedule.days.len());
    for day in &schedule.days {
        tables.push(writer.day(day));
        writer.y += AFTER_TABLE;
        if writer.y > PAGE_BREAK_Y {
            writer.new_page();
        }
    }

    let mut pages = writer.finish();
    // A break after the last table leaves an empty trailing page.
    if pages.len() > 1 && pages.last().is_some_and(|p| p.elements.is_empty()) {
        pages.pop();
    }
    DocumentLayout { pages, tables }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Exercise;
    use chrono::NaiveDate;

    fn exercise(name: &str, sets: &str, rest: &str, url: &str) -> Exercise {
        Exercise {
            name: name.to_string(),
            sets: sets.to_string(),
            rest_minutes: rest.to_string(),
            video_url: url.to_string(),
        }
    }

    fn schedule_with(rows_per_day: &[usize]) -> Schedule {
        let mut schedule = Schedule::new(NaiveDate::from_ymd_opt(2025, 3, 17).unwrap());
        schedule.days = rows_per_day
            .iter()
            .enumerate()
            .map(|(d, &rows)| Day {
                name: format!("Day {}", d + 1),
                exercises: (0..rows)
                    .map(|i| {
                        let url = if i % 2 == 0 { format!("http://x/{d}/{i}") } else { String::new() };
                        exercise(&format!("Ex {i}"), "3x10", "2", &url)
                    })
                    .collect(),
            })
            .collect();
        schedule
    }

    #[test]
    fn single_day_example_fits_one_page_with_one_link() {
        let mut schedule = Schedule::new(NaiveDate::from_ymd_opt(2025, 3, 17).unwrap());
        schedule.title = "Week 1".to_string();
        schedule.days[0].exercises = vec![exercise("Squat", "3x10", "2", "http://x/squat")];

        let layout = layout_schedule(&schedule, None);

        assert_eq!(layout.pages.len(), 1);
        let texts: Vec<_> = layout.pages[0].texts().collect();
        assert!(texts.contains(&"Week 1"));
        assert!(texts.contains(&"Day 1"));

        let row: Vec<_> = layout.tables[0].rows[0].cells.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(row, ["Squat", "3x10", "2", "http://x/squat"]);

        let links: Vec<_> = layout.pages[0].links().collect();
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].1, "http://x/squat");
        assert_eq!(*links[0].0, layout.tables[0].rows[0].cells[3].area);
    }

    #[test]
    fn one_table_per_day_with_four_cells_per_row() {
        let counts = [3, 0, 7, 2, 12, 1];
        let layout = layout_schedule(&schedule_with(&counts), None);

        assert_eq!(layout.tables.len(), counts.len());
        for (table, &rows) in layout.tables.iter().zip(&counts) {
            assert_eq!(table.rows.len(), rows);
            assert!(table.rows.iter().all(|r| r.cells.len() == 4));
        }
    }

    #[test]
    fn every_http_cell_gets_exactly_one_link_inside_it() {
        let layout = layout_schedule(&schedule_with(&[5, 9, 30, 4]), None);

        let link_cells: Vec<&TableCell> = layout
            .tables
            .iter()
            .flat_map(|t| &t.rows)
            .flat_map(|r| &r.cells)
            .filter(|c| c.is_link())
            .collect();
        assert_eq!(layout.link_count(), link_cells.len());

        for cell in link_cells {
            let matching = layout.pages[cell.page]
                .links()
                .filter(|(area, url)| *url == cell.text && cell.area.contains(area))
                .count();
            assert_eq!(matching, 1, "link for {}", cell.text);
        }
    }

    #[test]
    fn link_prefix_is_literal() {
        let mut schedule = schedule_with(&[0]);
        schedule.days[0].exercises = vec![exercise("httpbin", "HTTP://x", "", "ftp://x")];
        let layout = layout_schedule(&schedule, None);
        let links: Vec<_> = layout.pages[0].links().map(|(_, u)| u).collect();
        assert_eq!(links, ["httpbin"]);
    }

    #[test]
    fn accumulated_height_starts_new_pages() {
        let layout = layout_schedule(&schedule_with(&[10; 6]), None);
        assert!(layout.pages.len() > 1);
        for table in &layout.tables {
            assert!(table.heading_y <= PAGE_BREAK_Y);
        }
        assert!(layout.pages.iter().all(|p| !p.elements.is_empty()));
    }

    #[test]
    fn long_table_continues_on_next_page_with_header_repeated() {
        let layout = layout_schedule(&schedule_with(&[40]), None);

        assert_eq!(layout.tables[0].rows.len(), 40);
        assert_eq!(layout.pages.len(), 2);
        for page in &layout.pages {
            assert_eq!(page.texts().filter(|t| *t == "Exercise").count(), 1);
        }
        for cell in layout.tables[0].rows.iter().flat_map(|r| &r.cells) {
            assert!(cell.area.bottom() <= BOTTOM_LIMIT);
        }
        assert_eq!(layout.tables[0].rows[39].cells[0].page, 1);
    }

    #[test]
    fn heading_is_centered() {
        let layout = layout_schedule(&schedule_with(&[1]), None);
        let (x, size) = layout.pages[0]
            .elements
            .iter()
            .find_map(|e| match e {
                Element::Text { text, x, size, .. } if text == "Day 1" => Some((*x, *size)),
                _ => None,
            })
            .unwrap();
        let width = text_width("Day 1", size, true);
        assert!((x + width / 2.0 - PAGE_WIDTH / 2.0).abs() < 0.01);
    }

    #[test]
    fn without_logo_content_starts_at_default_offset() {
        let layout = layout_schedule(&schedule_with(&[1]), None);
        assert_eq!(layout.tables[0].heading_y, DEFAULT_CONTENT_TOP);
        assert!(!layout.pages[0].elements.iter().any(|e| matches!(e, Element::Logo(_))));
    }

    #[test]
    fn tall_logo_pushes_content_down_and_title_right() {
        let logo = LogoSize {
            width_px: 300,
            height_px: 300,
        };
        let layout = layout_schedule(&schedule_with(&[1]), Some(logo));
        let area = logo.area();

        assert!((area.height - LOGO_MAX_HEIGHT).abs() < 0.001);
        assert_eq!(layout.tables[0].heading_y, area.bottom() + 10.0);
        let title_x = layout.pages[0]
            .elements
            .iter()
            .find_map(|e| match e {
                Element::Text { x, size, .. } if *size == TITLE_SIZE => Some(*x),
                _ => None,
            })
            .unwrap();
        assert!(title_x > area.x + area.width);
    }

    #[test]
    fn long_values_are_shortened_but_kept_in_the_model() {
        let long = format!("http://example.com/{}", "a".repeat(200));
        let mut schedule = schedule_with(&[0]);
        schedule.days[0].exercises = vec![exercise("Squat", "", "", &long)];
        let layout = layout_schedule(&schedule, None);

        assert_eq!(layout.tables[0].rows[0].cells[3].text, long);
        let drawn = layout.pages[0]
            .texts()
            .find(|t| t.starts_with("http://example.com/"))
            .unwrap();
        assert!(drawn.ends_with("..."));
        assert!(text_width(drawn, CELL_SIZE, false) <= COLUMN_WIDTHS[3]);
    }

    #[test]
    fn huge_values_are_cut_in_one_step() {
        let value = "x".repeat(200_000);
        let max_width = COLUMN_WIDTHS[0] - 2.0 * CELL_PADDING;
        let shown = fit_text(&value, CELL_SIZE, max_width);

        let fits = (max_width / char_width(CELL_SIZE, false)).floor() as usize;
        assert_eq!(shown.chars().count(), fits);
        assert!(shown.ends_with("..."));
        assert!(text_width(&shown, CELL_SIZE, false) <= max_width);
    }

    #[test]
    fn short_values_are_drawn_whole() {
        assert_eq!(fit_text("3x10", CELL_SIZE, 26.0), "3x10");
        assert_eq!(fit_text("abcdef", CELL_SIZE, 2.0), "");
    }

    #[test]
    fn unencodable_characters_are_dropped_before_centring() {
        let mut schedule = schedule_with(&[1]);
        schedule.days[0].name = "Día de piernas 💪".to_string();
        let layout = layout_schedule(&schedule, None);

        let (text, x) = layout.pages[0]
            .elements
            .iter()
            .find_map(|e| match e {
                Element::Text { text, x, size, .. } if *size == HEADING_SIZE => Some((text.clone(), *x)),
                _ => None,
            })
            .unwrap();
        assert_eq!(text, "Día de piernas ");
        let width = text_width(&text, HEADING_SIZE, true);
        assert!((x + width / 2.0 - PAGE_WIDTH / 2.0).abs() < 0.01);
        assert_eq!(printable("€5 – “ok”"), "€5 – “ok”");
    }

    #[test]
    fn empty_title_uses_default() {
        let layout = layout_schedule(&schedule_with(&[1]), None);
        assert!(layout.pages[0].texts().any(|t| t == crate::models::DEFAULT_TITLE));
        assert!(layout.pages[0].texts().any(|t| t == "Start date: 2025-03-17"));
    }
}
