//! # Gallery Component
//!
//! Grid of video cards shown beneath the transcript once the agent returns
//! results. Stateless: it draws a `core::view::Gallery` as given.
//!
//! ```text
//! Top videos (last 3 months)
//! ╭ 1 ─────────────────╮╭ 2 ─────────────────╮
//! │ ▶ https://i.ytimg…  ││ ░░░░░░░░░░░░░░░░░░ │
//! │ Bread in 60 seconds ││ Untitled           │
//! │ Bake Daily • 1,204… ││                    │
//! │ youtube.com/watch…  ││ (no link)          │
//! ╰────────────────────╯╰────────────────────╯
//! ```

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph, Widget};

use crate::core::view::{Card, Gallery, Thumbnail};

/// Rows taken by the gallery heading.
const TITLE_HEIGHT: u16 = 1;
/// Borders (2) + thumbnail, title, meta and link lines.
pub const CARD_HEIGHT: u16 = 6;
/// Narrowest column before the grid drops a column.
const CARD_MIN_WIDTH: u16 = 32;
const MAX_COLUMNS: u16 = 3;

const NO_LINK: &str = "(no link)";
const PLACEHOLDER_FILL: &str = "░";

/// Number of grid columns that fit in `width`.
pub fn columns_for(width: u16) -> u16 {
    (width / CARD_MIN_WIDTH).clamp(1, MAX_COLUMNS)
}

#[derive(Clone, Copy)]
pub struct GalleryWidget<'a> {
    pub gallery: &'a Gallery,
}

impl<'a> GalleryWidget<'a> {
    pub fn new(gallery: &'a Gallery) -> Self {
        Self { gallery }
    }

    pub fn calculate_height(card_count: usize, width: u16) -> u16 {
        if card_count == 0 {
            return TITLE_HEIGHT;
        }
        let columns = usize::from(columns_for(width));
        let rows = u16::try_from(card_count.div_ceil(columns)).unwrap_or(u16::MAX);
        TITLE_HEIGHT.saturating_add(rows.saturating_mul(CARD_HEIGHT))
    }

    /// Screen rectangles of each card, in item order. Stops at the first
    /// card that does not fit inside `area`.
    pub fn card_areas(card_count: usize, area: Rect) -> Vec<Rect> {
        let columns = columns_for(area.width);
        let column_width = area.width / columns;
        (0..card_count)
            .map_while(|i| {
                let col = u16::try_from(i % usize::from(columns)).ok()?;
                let row = u16::try_from(i / usize::from(columns)).ok()?;
                let top = row
                    .checked_mul(CARD_HEIGHT)?
                    .checked_add(TITLE_HEIGHT)
                    .and_then(|offset| area.y.checked_add(offset))?;
                let rect = Rect::new(area.x + col * column_width, top, column_width, CARD_HEIGHT);
                (top.checked_add(CARD_HEIGHT)? <= area.bottom()).then_some(rect)
            })
            .collect()
    }
}

impl<'a> Widget for GalleryWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let heading = Line::from(Span::styled(
            self.gallery.title,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ));
        heading.render(Rect { height: TITLE_HEIGHT.min(area.height), ..area }, buf);

        let areas = Self::card_areas(self.gallery.cards.len(), area);
        for (index, (card, card_area)) in self.gallery.cards.iter().zip(areas).enumerate() {
            CardWidget { card, index }.render(card_area, buf);
        }
    }
}

struct CardWidget<'a> {
    card: &'a Card,
    index: usize,
}

impl<'a> CardWidget<'a> {
    fn lines(&self, inner_width: u16) -> Vec<Line<'a>> {
        let card = self.card;
        let dim = Style::default().fg(Color::DarkGray);

        let thumbnail = match &card.thumbnail {
            Thumbnail::Image(url) => Line::from(vec![
                Span::styled("▶ ", Style::default().fg(Color::Red)),
                Span::styled(url.as_str(), dim),
            ]),
            Thumbnail::Placeholder => {
                Line::from(Span::styled(PLACEHOLDER_FILL.repeat(inner_width as usize), dim))
            }
        };

        let link = match &card.link {
            Some(url) => Line::from(Span::styled(
                url.as_str(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::UNDERLINED),
            )),
            None => Line::from(Span::styled(NO_LINK, dim)),
        };

        vec![
            thumbnail,
            Line::from(Span::styled(
                card.title.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(card.meta.as_str(), dim)),
            link,
        ]
    }
}

impl<'a> Widget for CardWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let border_style = if self.card.link.is_some() {
            Style::default().fg(Color::Blue)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::bordered()
            .title((self.index + 1).to_string())
            .border_type(BorderType::Rounded)
            .border_style(border_style);

        let inner = block.inner(area);
        block.render(area, buf);
        Paragraph::new(self.lines(inner.width)).render(inner, buf);
    }
}
