//! Fixed card geometry, colors and display values.
//!
//! All coordinates are millimetres in PDF space: origin at the bottom-left of
//! the page, y growing upwards. Font sizes are points.

use crate::fonts::FontWeight;
use chrono::NaiveDate;

/// ID-1 card width.
pub const CARD_WIDTH_MM: f32 = 85.6;
/// ID-1 card height.
pub const CARD_HEIGHT_MM: f32 = 53.98;
/// Margin around the card face on every side of the page.
pub const PAGE_MARGIN_MM: f32 = 8.0;
/// Corner radius shared by the card face and its border.
pub const CORNER_RADIUS_MM: f32 = 4.0;
/// Offset of the light copy drawn under every text element.
pub const TEXT_SHADOW_OFFSET_MM: f32 = 0.3;
/// Offset of the light copy drawn under the logo.
pub const LOGO_SHADOW_OFFSET_MM: f32 = 0.4;
/// Edge of the square QR code.
pub const QR_SIZE_MM: f32 = 17.0;
/// Edge of the square box the logo is fitted into.
pub const LOGO_SIZE_MM: f32 = 30.0;
/// Border stroke width.
pub const BORDER_WIDTH_PT: f32 = 1.5;

/// Line segments used to approximate each quarter-circle corner.
const CORNER_SEGMENTS: usize = 8;

pub const HEADER_TITLE: &str = "SINDIKAT RADNIKA";
pub const HEADER_SUBTITLE: &str = "NCR ATLEOS - BEOGRAD";
pub const NAME_LABEL: &str = "IME I PREZIME:";
pub const MEMBER_ID_LABEL: &str = "BROJ ČLANSKE KARTE:";
pub const JOIN_DATE_LABEL: &str = "UČLANJEN:";

/// RGB color with components in `0.0..=1.0`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
    };
    /// `#1A4D6E`, the dark blue of all primary text.
    pub const TEXT: Color = Color {
        r: 26.0 / 255.0,
        g: 77.0 / 255.0,
        b: 110.0 / 255.0,
    };
    /// `#E8E8E8`, the tint of every text shadow.
    pub const SHADOW: Color = Color {
        r: 232.0 / 255.0,
        g: 232.0 / 255.0,
        b: 232.0 / 255.0,
    };
    /// `#E0E0E0`, the border stroke.
    pub const BORDER: Color = Color {
        r: 224.0 / 255.0,
        g: 224.0 / 255.0,
        b: 224.0 / 255.0,
    };
}

/// Axis-aligned rectangle anchored at its bottom-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The same rectangle moved by `(dx, dy)`.
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

/// Rectangle with circular corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoundedRect {
    pub rect: Rect,
    pub radius: f32,
}

impl RoundedRect {
    /// Closed outline as a polyline, counter-clockwise from the bottom edge.
    ///
    /// The radius is clamped to half the shorter side.
    pub fn outline(&self) -> Vec<(f32, f32)> {
        let Rect {
            x,
            y,
            width,
            height,
        } = self.rect;
        let r = self.radius.max(0.0).min(width.min(height) / 2.0);

        // (center_x, center_y, start angle in quarter turns)
        let corners = [
            (x + width - r, y + r, 3.0),
            (x + width - r, y + height - r, 0.0),
            (x + r, y + height - r, 1.0),
            (x + r, y + r, 2.0),
        ];

        let mut points = Vec::with_capacity(corners.len() * (CORNER_SEGMENTS + 1));
        for (cx, cy, quarter) in corners {
            for step in 0..=CORNER_SEGMENTS {
                let angle = (quarter + step as f32 / CORNER_SEGMENTS as f32)
                    * std::f32::consts::FRAC_PI_2;
                points.push((cx + r * angle.cos(), cy + r * angle.sin()));
            }
        }
        points
    }
}

/// Where and how one text element is set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextSlot {
    pub x: f32,
    pub y: f32,
    pub weight: FontWeight,
    pub size_pt: f32,
}

impl TextSlot {
    fn new(x: f32, y: f32, weight: FontWeight, size_pt: f32) -> Self {
        Self {
            x,
            y,
            weight,
            size_pt,
        }
    }

    /// Baseline origin of the light shadow copy.
    pub fn shadow_origin(&self) -> (f32, f32) {
        (
            self.x + TEXT_SHADOW_OFFSET_MM,
            self.y - TEXT_SHADOW_OFFSET_MM,
        )
    }
}

/// Absolute positions of every card element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardGeometry {
    /// The card face within the page.
    pub card: Rect,
}

impl Default for CardGeometry {
    fn default() -> Self {
        Self::standard()
    }
}

impl CardGeometry {
    /// ID-1 card centered on a page with an 8 mm margin.
    pub fn standard() -> Self {
        Self {
            card: Rect::new(PAGE_MARGIN_MM, PAGE_MARGIN_MM, CARD_WIDTH_MM, CARD_HEIGHT_MM),
        }
    }

    pub fn page_width(&self) -> f32 {
        self.card.width + 2.0 * PAGE_MARGIN_MM
    }

    pub fn page_height(&self) -> f32 {
        self.card.height + 2.0 * PAGE_MARGIN_MM
    }

    /// Card face, used for both the background fill and the border stroke.
    pub fn card_face(&self) -> RoundedRect {
        RoundedRect {
            rect: self.card,
            radius: CORNER_RADIUS_MM,
        }
    }

    fn top(&self) -> f32 {
        self.card.y + self.card.height
    }

    fn info_base(&self) -> f32 {
        self.card.y + 24.0
    }

    pub fn header_title(&self) -> TextSlot {
        TextSlot::new(self.card.x + 7.0, self.top() - 9.0, FontWeight::Bold, 11.0)
    }

    pub fn header_subtitle(&self) -> TextSlot {
        TextSlot::new(self.card.x + 7.0, self.top() - 13.5, FontWeight::Regular, 7.0)
    }

    pub fn name_label(&self) -> TextSlot {
        TextSlot::new(self.card.x + 8.0, self.info_base(), FontWeight::Regular, 7.0)
    }

    pub fn name_value(&self) -> TextSlot {
        TextSlot::new(self.card.x + 8.0, self.info_base() - 5.0, FontWeight::Bold, 10.0)
    }

    pub fn member_id_label(&self) -> TextSlot {
        TextSlot::new(self.card.x + 8.0, self.info_base() - 11.0, FontWeight::Regular, 7.0)
    }

    pub fn member_id_value(&self) -> TextSlot {
        TextSlot::new(self.card.x + 8.0, self.info_base() - 16.0, FontWeight::Bold, 9.0)
    }

    pub fn join_date_label(&self) -> TextSlot {
        TextSlot::new(self.card.x + 8.0, self.info_base() - 21.5, FontWeight::Regular, 7.0)
    }

    pub fn join_date_value(&self) -> TextSlot {
        TextSlot::new(self.card.x + 22.0, self.info_base() - 21.5, FontWeight::Bold, 7.0)
    }

    /// Lower-right square holding the QR code.
    pub fn qr_box(&self) -> Rect {
        Rect::new(
            self.card.x + self.card.width - QR_SIZE_MM - 1.5,
            self.card.y + 3.0,
            QR_SIZE_MM,
            QR_SIZE_MM,
        )
    }

    /// Upper-right box the logo is fitted into. It overhangs the card edge
    /// by 4.5 mm on the right and top.
    pub fn logo_box(&self) -> Rect {
        Rect::new(
            self.card.x + self.card.width - LOGO_SIZE_MM + 4.5,
            self.top() - LOGO_SIZE_MM + 4.5,
            LOGO_SIZE_MM,
            LOGO_SIZE_MM,
        )
    }
}

/// Largest rectangle with the image's aspect ratio that fits in `bounds`,
/// centered in it.
pub fn fit_within(bounds: Rect, width_px: u32, height_px: u32) -> Rect {
    if width_px == 0 || height_px == 0 {
        return bounds;
    }

    let aspect_ratio = width_px as f32 / height_px as f32;
    let (width, height) = if bounds.width / bounds.height > aspect_ratio {
        // Height-constrained
        (bounds.height * aspect_ratio, bounds.height)
    } else {
        // Width-constrained
        (bounds.width, bounds.width / aspect_ratio)
    };

    Rect::new(
        bounds.x + (bounds.width - width) / 2.0,
        bounds.y + (bounds.height - height) / 2.0,
        width,
        height,
    )
}

/// Upper-cased "FIRST LAST" as printed on the card.
pub fn display_name(first_name: &str, last_name: &str) -> String {
    format!("{} {}", first_name.to_uppercase(), last_name.to_uppercase())
}

/// `MM/YYYY` for an ISO date, otherwise the input unchanged.
///
/// Malformed dates are not rejected; they are printed verbatim.
pub fn format_join_date(raw: &str) -> String {
    if !is_iso_date_shape(raw) {
        return raw.to_string();
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.format("%m/%Y").to_string(),
        Err(_) => raw.to_string(),
    }
}

/// Four-digit year from 0001, then one or two digits each for month and
/// day. chrono alone also takes padding, signed years and year zero.
fn is_iso_date_shape(raw: &str) -> bool {
    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    let mut parts = raw.split('-');

    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(year), Some(month), Some(day), None) => {
            year.len() == 4
                && all_digits(year)
                && year != "0000"
                && (1..=2).contains(&month.len())
                && all_digits(month)
                && (1..=2).contains(&day.len())
                && all_digits(day)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_page_size_adds_margins() {
        let geometry = CardGeometry::standard();
        assert!(approx(geometry.page_width(), 101.6));
        assert!(approx(geometry.page_height(), 69.98));
    }

    #[test]
    fn test_header_and_info_positions() {
        let geometry = CardGeometry::standard();
        let title = geometry.header_title();
        assert!(approx(title.x, 15.0));
        assert!(approx(title.y, 8.0 + 53.98 - 9.0));
        assert_eq!(title.weight, FontWeight::Bold);

        let join = geometry.join_date_value();
        assert!(approx(join.x, 30.0));
        assert!(approx(join.y, 8.0 + 24.0 - 21.5));
        assert_eq!(join.size_pt, 7.0);
    }

    #[test]
    fn test_shadow_origin_is_down_right() {
        let slot = CardGeometry::standard().name_value();
        let (sx, sy) = slot.shadow_origin();
        assert!(approx(sx, slot.x + 0.3));
        assert!(approx(sy, slot.y - 0.3));
    }

    #[test]
    fn test_qr_and_logo_boxes() {
        let geometry = CardGeometry::standard();
        let qr = geometry.qr_box();
        assert!(approx(qr.x, 8.0 + 85.6 - 17.0 - 1.5));
        assert!(approx(qr.y, 11.0));
        assert!(approx(qr.width, qr.height));

        let logo = geometry.logo_box();
        assert!(approx(logo.x + logo.width, 8.0 + 85.6 + 4.5));
        assert!(approx(logo.y + logo.height, 8.0 + 53.98 + 4.5));
    }

    #[test]
    fn test_rounded_outline_stays_inside_rect() {
        let face = CardGeometry::standard().card_face();
        let outline = face.outline();
        assert_eq!(outline.len(), 4 * (CORNER_SEGMENTS + 1));
        for (x, y) in outline {
            assert!(x >= face.rect.x - 1e-3 && x <= face.rect.x + face.rect.width + 1e-3);
            assert!(y >= face.rect.y - 1e-3 && y <= face.rect.y + face.rect.height + 1e-3);
        }
    }

    #[test]
    fn test_rounded_outline_clamps_radius() {
        let rr = RoundedRect {
            rect: Rect::new(0.0, 0.0, 4.0, 2.0),
            radius: 10.0,
        };
        for (_, y) in rr.outline() {
            assert!((-1e-4..=2.0001).contains(&y));
        }
    }

    #[test]
    fn test_fit_within_wide_image() {
        let fitted = fit_within(Rect::new(0.0, 0.0, 30.0, 30.0), 200, 100);
        assert!(approx(fitted.width, 30.0));
        assert!(approx(fitted.height, 15.0));
        assert!(approx(fitted.y, 7.5));
    }

    #[test]
    fn test_fit_within_tall_image() {
        let fitted = fit_within(Rect::new(10.0, 10.0, 30.0, 30.0), 50, 100);
        assert!(approx(fitted.width, 15.0));
        assert!(approx(fitted.height, 30.0));
        assert!(approx(fitted.x, 17.5));
    }

    #[test]
    fn test_display_name_uppercases_extended_script() {
        assert_eq!(display_name("ana", "Perić"), "ANA PERIĆ");
        assert_eq!(display_name("đorđe", "šuljagić"), "ĐORĐE ŠULJAGIĆ");
        assert_eq!(display_name("ŽELJKO", "čolić"), "ŽELJKO ČOLIĆ");
    }

    #[test]
    fn test_format_join_date_iso() {
        assert_eq!(format_join_date("2024-03-15"), "03/2024");
        assert_eq!(format_join_date("1999-12-01"), "12/1999");
    }

    #[test]
    fn test_format_join_date_fallback() {
        assert_eq!(format_join_date("March 2024"), "March 2024");
        assert_eq!(format_join_date("2024-02-30"), "2024-02-30");
        assert_eq!(format_join_date(""), "");
        assert_eq!(format_join_date(" 2024-03-15"), " 2024-03-15");
        assert_eq!(format_join_date("2024-03-15 "), "2024-03-15 ");
        assert_eq!(format_join_date("+2024-03-15"), "+2024-03-15");
        assert_eq!(format_join_date("0000-01-01"), "0000-01-01");
        assert_eq!(format_join_date("12024-03-15"), "12024-03-15");
        assert_eq!(format_join_date("2024-003-15"), "2024-003-15");
    }

    #[test]
    fn test_format_join_date_short_fields() {
        assert_eq!(format_join_date("2024-3-5"), "03/2024");
        assert_eq!(format_join_date("0001-01-01"), "01/0001");
    }
}
