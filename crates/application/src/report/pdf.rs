//! PDF rendering of a [`ReportDocument`] on A4 pages using the PDF builtin
//! Helvetica faces.
//!
//! printpdf places text from the bottom-left corner; the writer keeps a
//! cursor measured from the top of the page and converts on output.

use super::{RemarksBlock, ReportDocument, ReportError, ReportTable, NO_REMARKS};
use printpdf::{
    BuiltinFont, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point,
};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 14.0;
const TOP: f32 = 20.0;
const BOTTOM: f32 = 20.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
const CELL_PADDING: f32 = 1.5;
const LABEL_WIDTH: f32 = 60.0;
const PT_TO_MM: f32 = 0.3528;
/// Average Helvetica glyph width as a fraction of the font size.
const GLYPH_WIDTH: f32 = 0.5;

/// Render the report to PDF bytes.
pub fn render_pdf(doc: &ReportDocument) -> Result<Vec<u8>, ReportError> {
    let mut writer = PdfWriter::new(&doc.title)?;

    writer.centered(&doc.title, 12.0, true);
    writer.advance(10.0);

    for (label, value) in &doc.team_details {
        writer.text(label, 9.0, MARGIN, true);
        writer.text(":", 9.0, MARGIN + LABEL_WIDTH, true);
        writer.text(value, 9.0, MARGIN + LABEL_WIDTH + 5.0, false);
        writer.advance(5.0);
    }
    writer.advance(2.0);

    writer.text("TEAM MEMBERS:", 9.0, MARGIN, true);
    writer.advance(3.0);
    writer.table(&doc.roster, &[90.0, CONTENT_WIDTH - 90.0], 8.0);
    writer.advance(8.0);

    writer.ensure_space(20.0);
    writer.text("SCORING RUBRICS:-", 10.0, MARGIN, true);
    writer.advance(3.0);
    let widths = scoring_widths(doc.scoring.headers.len());
    writer.table(&doc.scoring, &widths, 7.0);
    writer.advance(6.0);

    writer.ensure_space(10.0);
    writer.text(&doc.total_line, 10.0, MARGIN, true);
    writer.advance(10.0);

    writer.ensure_space(12.0);
    writer.text("REMARKS:", 10.0, MARGIN, true);
    writer.advance(6.0);
    writer.remarks(&doc.remarks);

    writer.advance(10.0);
    writer.ensure_space(20.0);
    if !doc.signatories.is_empty() {
        let slot = CONTENT_WIDTH / doc.signatories.len() as f32;
        let chars = max_chars(slot - 2.0, 9.0);
        for (i, signatory) in doc.signatories.iter().enumerate() {
            let x = MARGIN + slot * i as f32;
            writer.text(&truncate(&signatory.name, chars), 9.0, x, true);
            writer.text_at(&truncate(&signatory.designation, chars), 9.0, x, 5.0, false);
        }
        writer.advance(15.0);
    }

    if let Some(footer) = &doc.footer {
        writer.ensure_space(8.0);
        writer.text(footer, 8.0, MARGIN, false);
    }

    writer.finish()
}

struct PdfWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    /// Distance from the top edge, in mm
    y: f32,
    pages: usize,
}

impl PdfWriter {
    fn new(title: &str) -> Result<Self, ReportError> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::Font(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::Font(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);
        layer.set_outline_thickness(0.5);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            y: TOP,
            pages: 1,
        })
    }

    fn advance(&mut self, mm: f32) {
        self.y += mm;
    }

    fn ensure_space(&mut self, needed: f32) {
        if self.y + needed > PAGE_HEIGHT - BOTTOM {
            self.new_page();
        }
    }

    fn new_page(&mut self) {
        let (page, layer) = self.doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.layer.set_outline_thickness(0.5);
        self.y = TOP;
        self.pages += 1;
    }

    fn text(&self, text: &str, size: f32, x: f32, bold: bool) {
        self.text_at(text, size, x, 0.0, bold);
    }

    /// Text `below` mm under the cursor without moving it.
    fn text_at(&self, text: &str, size: f32, x: f32, below: f32, bold: bool) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer
            .use_text(text, size, Mm(x), Mm(PAGE_HEIGHT - (self.y + below)), font);
    }

    fn centered(&self, text: &str, size: f32, bold: bool) {
        let width = text_width(text, size);
        let x = ((PAGE_WIDTH - width) / 2.0).max(MARGIN);
        self.text(text, size, x, bold);
    }

    fn hline(&self, x1: f32, x2: f32, y: f32) {
        self.line((x1, y), (x2, y));
    }

    fn line(&self, from: (f32, f32), to: (f32, f32)) {
        self.layer.add_line(Line {
            points: vec![
                (Point::new(Mm(from.0), Mm(PAGE_HEIGHT - from.1)), false),
                (Point::new(Mm(to.0), Mm(PAGE_HEIGHT - to.1)), false),
            ],
            is_closed: false,
        });
    }

    /// One block per judge; long remarks continue on the next page.
    fn remarks(&mut self, block: &RemarksBlock) {
        const LINE: f32 = 5.0;

        match block {
            RemarksBlock::Provided(entries) => {
                for entry in entries {
                    let lines = wrap(&entry.remarks, max_chars(CONTENT_WIDTH - 6.0, 9.0));
                    // keep the name with at least its first line
                    self.ensure_space(2.0 * LINE);
                    self.text(&format!("{}:", entry.judge_name), 9.0, MARGIN, true);
                    self.advance(LINE);
                    for line in lines {
                        self.ensure_space(LINE);
                        self.text(&line, 9.0, MARGIN + 6.0, false);
                        self.advance(LINE);
                    }
                    self.advance(2.0);
                }
            }
            RemarksBlock::NoneProvided => {
                self.text(NO_REMARKS, 9.0, MARGIN, false);
                self.advance(LINE);
            }
        }
    }

    /// Grid table; the header row is repeated after every page break.
    fn table(&mut self, table: &ReportTable, widths: &[f32], size: f32) {
        let line_height = size * PT_TO_MM + 1.2;

        self.table_row(&table.headers, widths, size, line_height, true);
        for row in &table.rows {
            let height = row_height(row, widths, size, line_height);
            if self.y + height > PAGE_HEIGHT - BOTTOM {
                self.new_page();
                self.table_row(&table.headers, widths, size, line_height, true);
            }
            self.table_row(row, widths, size, line_height, false);
        }
    }

    fn table_row(
        &mut self,
        cells: &[String],
        widths: &[f32],
        size: f32,
        line_height: f32,
        bold: bool,
    ) {
        let height = row_height(cells, widths, size, line_height);
        let left = MARGIN;
        let right = MARGIN + widths.iter().sum::<f32>();
        let top = self.y;

        self.hline(left, right, top);
        let mut x = left;
        for (cell, width) in cells.iter().zip(widths) {
            let lines = wrap(cell, max_chars(width - 2.0 * CELL_PADDING, size));
            for (i, line) in lines.iter().enumerate() {
                self.text_at(
                    line,
                    size,
                    x + CELL_PADDING,
                    CELL_PADDING + line_height * (i as f32 + 1.0) - 1.0,
                    bold,
                );
            }
            self.line((x, top), (x, top + height));
            x += width;
        }
        self.line((right, top), (right, top + height));
        self.hline(left, right, top + height);

        self.y += height;
    }
}

impl PdfWriter {
    fn finish(self) -> Result<Vec<u8>, ReportError> {
        self.doc
            .save_to_bytes()
            .map_err(|e| ReportError::Pdf(e.to_string()))
    }
}

/// S.L and PARAMETERS get fixed widths; judge and total columns share the rest.
fn scoring_widths(columns: usize) -> Vec<f32> {
    let fixed = [10.0, 50.0];
    let flexible = columns.saturating_sub(fixed.len()).max(1);
    let share = (CONTENT_WIDTH - fixed.iter().sum::<f32>()) / flexible as f32;

    fixed
        .iter()
        .copied()
        .chain(std::iter::repeat(share))
        .take(columns)
        .collect()
}

fn row_height(cells: &[String], widths: &[f32], size: f32, line_height: f32) -> f32 {
    let lines = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| wrap(cell, max_chars(width - 2.0 * CELL_PADDING, size)).len())
        .max()
        .unwrap_or(1)
        .max(1);
    lines as f32 * line_height + 2.0 * CELL_PADDING
}

fn text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * size * PT_TO_MM * GLYPH_WIDTH
}

fn max_chars(width: f32, size: f32) -> usize {
    ((width / (size * PT_TO_MM * GLYPH_WIDTH)).floor() as usize).max(1)
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        text.chars().take(max).collect()
    }
}

/// Greedy word wrap; explicit newlines are kept and overlong words are split.
fn wrap(text: &str, max: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > max {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                lines.push(word.drain(..max).collect());
            }
            let word: String = word.into_iter().collect();
            if word.is_empty() {
                continue;
            }

            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if needed > max && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::ReportDocument;
    use crate::scoring::{aggregate, JudgeRemark, TeamSnapshot};
    use scorecard_common::config::ReportConfig;
    use scorecard_domain::{EventType, Team, TeamMember};

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("JUDGE-Ada\nR1", 20), vec!["JUDGE-Ada", "R1"]);
        assert_eq!(wrap("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(wrap("", 5), vec![""]);
    }

    #[test]
    fn test_scoring_widths_fill_the_page() {
        let widths = scoring_widths(7);
        assert_eq!(widths.len(), 7);
        assert!((widths.iter().sum::<f32>() - CONTENT_WIDTH).abs() < 0.01);
    }

    #[test]
    fn test_render_produces_pdf() {
        let team = Team::new("Empty", EventType::StartupExpo, vec![TeamMember::new("Solo")]);
        let analytics = aggregate(&TeamSnapshot::new(team, vec![]));
        let doc = ReportDocument::build(&analytics, &ReportConfig::default());

        let bytes = render_pdf(&doc).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_long_remark_flows_onto_following_pages() {
        let mut writer = PdfWriter::new("Remarks").unwrap();
        let remark = vec!["Consistent delivery."; 200].join("\n");

        writer.remarks(&RemarksBlock::Provided(vec![JudgeRemark {
            judge_name: "Grace Hopper".to_string(),
            remarks: remark,
        }]));

        // 201 lines at 5 mm on 257 mm of usable height
        assert!(writer.pages >= 4);
        assert!(writer.y <= PAGE_HEIGHT - BOTTOM + 2.0);
        assert!(writer.finish().unwrap().starts_with(b"%PDF"));
    }
}
