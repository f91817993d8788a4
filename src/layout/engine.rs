//! Cursor-based page compositor.
//!
//! The engine owns all mutable layout state for exactly one render: the open
//! page, its cursor, and the pages finished so far. Blocks are measured before
//! they are drawn and move to a fresh page as a whole when they do not fit.
//! Tables are the exception and may break between data rows.

use tracing::{debug, warn};

use super::block::{Block, Frame, Table};
use super::measure::{AverageGlyph, TextMeasure};
use super::page::Page;
use super::style;
use crate::config::PageConfig;
use crate::error::RenderError;

/// Slack when comparing accumulated `f32` positions against the bottom
/// limit, far below any visible distance.
const FIT_TOLERANCE: f32 = 0.01;

enum PageState {
    NoActivePage,
    Active { page: Page, cursor_y: f32 },
}

/// Lays out blocks onto fixed-size pages.
///
/// # Examples
///
/// ```
/// use office_energy_report::config::PageConfig;
/// use office_energy_report::layout::{Block, DocumentLayoutEngine};
///
/// # fn main() -> Result<(), office_energy_report::error::RenderError> {
/// let mut engine = DocumentLayoutEngine::new(PageConfig::default())?;
/// engine.start_page()?;
/// engine.place(&Block::section("A. SUMMARY"))?;
/// let pages = engine.finish()?;
/// assert_eq!(pages.len(), 1);
/// assert!(pages[0].contains_text("Page 1"));
/// # Ok(())
/// # }
/// ```
pub struct DocumentLayoutEngine {
    config: PageConfig,
    measure: Box<dyn TextMeasure>,
    state: PageState,
    pages: Vec<Page>,
}

impl DocumentLayoutEngine {
    /// Creates an engine for the given page geometry.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidGeometry`] if the page has no usable
    /// content area or allows zero pages.
    pub fn new(config: PageConfig) -> Result<Self, RenderError> {
        let dims = [
            config.width,
            config.height,
            config.margin_x,
            config.content_top,
            config.bottom_margin,
            config.header_band,
            config.char_width_factor,
        ];
        if dims.iter().any(|v| !v.is_finite()) {
            return Err(RenderError::InvalidGeometry(
                "page dimensions must be finite".to_string(),
            ));
        }
        if config.usable_height() <= 0.0 {
            return Err(RenderError::InvalidGeometry(format!(
                "usable height {} is not positive",
                config.usable_height()
            )));
        }
        if config.content_width() <= 0.0 {
            return Err(RenderError::InvalidGeometry(format!(
                "content width {} is not positive",
                config.content_width()
            )));
        }
        if config.max_pages == 0 {
            return Err(RenderError::InvalidGeometry(
                "max_pages must be at least 1".to_string(),
            ));
        }
        let measure = Box::new(AverageGlyph::new(config.char_width_factor));
        Ok(Self {
            config,
            measure,
            state: PageState::NoActivePage,
            pages: Vec::new(),
        })
    }

    /// Replaces the text measurement used for wrapping.
    pub fn with_measure(mut self, measure: Box<dyn TextMeasure>) -> Self {
        self.measure = measure;
        self
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Pages allocated so far, the open page included.
    pub fn page_count(&self) -> usize {
        match self.state {
            PageState::NoActivePage => self.pages.len(),
            PageState::Active { .. } => self.pages.len() + 1,
        }
    }

    /// Current cursor, or `None` when no page is open.
    pub fn cursor_y(&self) -> Option<f32> {
        match self.state {
            PageState::NoActivePage => None,
            PageState::Active { cursor_y, .. } => Some(cursor_y),
        }
    }

    /// Closes the open page (if any) and opens a new one with the running
    /// header band painted and the cursor at the content top.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::PageLimitExceeded`] when the page budget is spent.
    pub fn start_page(&mut self) -> Result<(), RenderError> {
        let mut page = self.allocate()?;
        let band = self.config.header_band;
        if band > 0.0 {
            page.rect(0.0, 0.0, self.config.width, band, style::NAVY);
            let baseline = band - 8.0;
            page.text(
                self.config.margin_x,
                baseline,
                self.config.title.as_str(),
                style::RUNNING_TITLE,
            );
            page.text(
                self.config.width - self.config.margin_x,
                baseline,
                format!("Page {}", page.number),
                style::RUNNING_PAGE,
            );
        }
        debug!(page = page.number, "page started");
        self.state = PageState::Active {
            page,
            cursor_y: self.config.content_top,
        };
        Ok(())
    }

    /// Paints a whole page outside the flowing layout and finalizes it
    /// immediately. No page is open afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::PageLimitExceeded`] when the page budget is spent.
    pub fn fixed_page(&mut self, paint: impl FnOnce(&mut Page)) -> Result<(), RenderError> {
        let mut page = self.allocate()?;
        paint(&mut page);
        debug!(page = page.number, "fixed page painted");
        self.pages.push(page);
        Ok(())
    }

    /// Starts a new page if `required` points do not fit below the cursor.
    ///
    /// A fresh page is never abandoned, so a request taller than the usable
    /// height is satisfied in place and left to overflow.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NoActivePage`] before the first `start_page`,
    /// or [`RenderError::PageLimitExceeded`] if the break needs a page the
    /// budget does not allow.
    pub fn check_overflow(&mut self, required: f32) -> Result<(), RenderError> {
        let PageState::Active { cursor_y, .. } = self.state else {
            return Err(RenderError::NoActivePage);
        };
        let fresh = cursor_y <= self.config.content_top;
        if cursor_y + required > self.config.bottom_limit() + FIT_TOLERANCE && !fresh {
            self.start_page()?;
        }
        Ok(())
    }

    /// Breaks the page unless the leading blocks of a group fit together.
    ///
    /// A table in `lead` counts only its header and first row.
    ///
    /// # Errors
    ///
    /// Same as [`check_overflow`](Self::check_overflow).
    pub fn keep_together(&mut self, lead: &[Block]) -> Result<(), RenderError> {
        let frame = self.frame();
        let required: f32 = lead
            .iter()
            .map(|block| match block {
                Block::Table(table) => table.lead_height(),
                other => other.measure(&frame),
            })
            .sum();
        self.check_overflow(required)
    }

    /// Places a block at the cursor, breaking the page first if it does not fit.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NoActivePage`] before the first `start_page`,
    /// or [`RenderError::PageLimitExceeded`] when a break exceeds the budget.
    pub fn place(&mut self, block: &Block) -> Result<(), RenderError> {
        if let Block::Table(table) = block {
            return self.place_table(table);
        }
        let height = block.measure(&self.frame());
        if height > self.config.usable_height() {
            warn!(height, usable = self.config.usable_height(), "block taller than a page");
        }
        self.check_overflow(height)?;
        let top = self.draw(|page, top, frame| block.draw(page, top, frame))?;
        self.advance(height);
        debug!(top, height, "block placed");
        Ok(())
    }

    /// Draws the header with the first row, then overflow-checks every
    /// remaining row on its own.
    fn place_table(&mut self, table: &Table) -> Result<(), RenderError> {
        let header = table.header_height();
        self.check_overflow(table.lead_height())?;
        self.draw(|page, top, frame| table.draw_header(page, top, frame))?;
        self.advance(header);
        for index in 0..table.rows.len() {
            self.check_overflow(table.row_height)?;
            self.draw(|page, top, frame| table.draw_row(page, top, index, frame))?;
            self.advance(table.row_height);
        }
        Ok(())
    }

    /// Closes the open page and returns every page in order.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::NoActivePage`] if nothing was ever laid out.
    pub fn finish(mut self) -> Result<Vec<Page>, RenderError> {
        if let PageState::Active { page, .. } =
            std::mem::replace(&mut self.state, PageState::NoActivePage)
        {
            self.pages.push(page);
        }
        if self.pages.is_empty() {
            return Err(RenderError::NoActivePage);
        }
        Ok(self.pages)
    }

    fn frame(&self) -> Frame<'_> {
        Frame {
            margin_x: self.config.margin_x,
            page_width: self.config.width,
            measure: self.measure.as_ref(),
        }
    }

    /// Finalizes any open page and hands out the next numbered blank page.
    fn allocate(&mut self) -> Result<Page, RenderError> {
        if let PageState::Active { page, .. } =
            std::mem::replace(&mut self.state, PageState::NoActivePage)
        {
            self.pages.push(page);
        }
        if self.pages.len() >= self.config.max_pages {
            return Err(RenderError::PageLimitExceeded {
                limit: self.config.max_pages,
            });
        }
        Ok(Page::new(
            self.pages.len() + 1,
            self.config.width,
            self.config.height,
        ))
    }

    fn draw(
        &mut self,
        paint: impl FnOnce(&mut Page, f32, &Frame<'_>),
    ) -> Result<f32, RenderError> {
        let frame = Frame {
            margin_x: self.config.margin_x,
            page_width: self.config.width,
            measure: self.measure.as_ref(),
        };
        match &mut self.state {
            PageState::Active { page, cursor_y } => {
                paint(page, *cursor_y, &frame);
                Ok(*cursor_y)
            }
            PageState::NoActivePage => Err(RenderError::NoActivePage),
        }
    }

    fn advance(&mut self, dy: f32) {
        if let PageState::Active { cursor_y, .. } = &mut self.state {
            *cursor_y += dy;
        }
    }
}
