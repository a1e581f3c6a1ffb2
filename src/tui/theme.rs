//! Color schemes, badges, and footer hints.
//!
//! The palette is semantic: views ask for `featured` or `deadline`, never
//! for a raw color, so swapping the theme re-skins every widget at once.
//! The active theme lives in a process-wide lock because render functions
//! are called from deep inside the widget tree where threading a theme
//! argument through every signature is not worth it.

use ratatui::prelude::*;
use std::sync::RwLock;

use crate::catalog::FacetKind;

/// Semantic colors for the catalog UI.
#[derive(Debug, Clone, Copy)]
pub struct ColorScheme {
    // Catalog accents
    pub featured: Color,
    pub discount: Color,
    pub deadline: Color,
    pub organization: Color,
    pub category: Color,
    pub benefit: Color,

    // Chrome
    pub primary: Color,
    pub accent: Color,
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,
    pub background_alt: Color,
    pub text: Color,
    pub text_muted: Color,
    pub selection: Color,
    pub selection_bg: Color,

    // Status
    pub success: Color,
    pub warning: Color,
    pub error: Color,

    // Text placed on top of a colored badge
    pub badge_fg_dark: Color,
    pub badge_fg_light: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl ColorScheme {
    /// Palette for dark terminals (default).
    pub const fn dark() -> Self {
        Self {
            featured: Color::Rgb(255, 100, 50),
            discount: Color::Green,
            deadline: Color::Yellow,
            organization: Color::Cyan,
            category: Color::Blue,
            benefit: Color::Magenta,

            primary: Color::Cyan,
            accent: Color::Yellow,
            muted: Color::DarkGray,
            border: Color::DarkGray,
            border_focused: Color::Cyan,
            background_alt: Color::Rgb(28, 28, 38),
            text: Color::White,
            text_muted: Color::Gray,
            selection: Color::DarkGray,
            selection_bg: Color::Rgb(58, 58, 82),

            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,

            badge_fg_dark: Color::Black,
            badge_fg_light: Color::White,
        }
    }

    /// Palette for light terminals.
    pub const fn light() -> Self {
        Self {
            featured: Color::Rgb(198, 68, 22),
            discount: Color::Rgb(0, 122, 0),
            deadline: Color::Rgb(172, 134, 0),
            organization: Color::Rgb(0, 96, 144),
            category: Color::Rgb(24, 24, 160),
            benefit: Color::Rgb(126, 0, 126),

            primary: Color::Rgb(0, 96, 144),
            accent: Color::Rgb(172, 134, 0),
            muted: Color::Rgb(148, 148, 148),
            border: Color::Rgb(176, 176, 176),
            border_focused: Color::Rgb(0, 96, 144),
            background_alt: Color::Rgb(238, 238, 244),
            text: Color::Rgb(32, 32, 32),
            text_muted: Color::Rgb(104, 104, 104),
            selection: Color::Rgb(198, 218, 238),
            selection_bg: Color::Rgb(198, 218, 238),

            success: Color::Rgb(0, 122, 0),
            warning: Color::Rgb(172, 134, 0),
            error: Color::Rgb(196, 0, 0),

            badge_fg_dark: Color::Rgb(32, 32, 32),
            badge_fg_light: Color::White,
        }
    }

    /// Accent color for a facet kind badge.
    #[must_use]
    pub fn facet_color(&self, kind: FacetKind) -> Color {
        match kind {
            FacetKind::Organization => self.organization,
            FacetKind::Category => self.category,
            FacetKind::BenefitType => self.benefit,
        }
    }

    /// Accent for a discount percentage. Bigger discounts draw more attention.
    #[must_use]
    pub fn discount_color(&self, percent: u8) -> Color {
        match percent {
            30.. => self.featured,
            10..=29 => self.discount,
            _ => self.text_muted,
        }
    }
}

// ============================================================================
// Theme selection
// ============================================================================

/// A named color scheme.
#[derive(Debug, Clone)]
pub struct Theme {
    pub colors: ColorScheme,
    pub name: &'static str,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub const fn dark() -> Self {
        Self {
            colors: ColorScheme::dark(),
            name: "dark",
        }
    }

    pub const fn light() -> Self {
        Self {
            colors: ColorScheme::light(),
            name: "light",
        }
    }

    /// Theme for a config value; unknown names fall back to dark.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        if name.eq_ignore_ascii_case("light") {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// The other theme in the dark/light pair.
    #[must_use]
    pub fn next(&self) -> Self {
        match self.name {
            "dark" => Self::light(),
            _ => Self::dark(),
        }
    }
}

/// Active theme, switchable at runtime with the `T` key.
static THEME: RwLock<Theme> = RwLock::new(Theme::dark());

/// Install `theme` as the active one.
pub fn set_theme(theme: Theme) {
    *THEME.write().expect("THEME lock not poisoned") = theme;
}

/// Swap dark and light. Returns the name of the theme now active.
pub fn toggle_theme() -> &'static str {
    let mut theme = THEME.write().expect("THEME lock not poisoned");
    *theme = theme.next();
    theme.name
}

/// Colors of the active theme.
#[must_use]
pub fn colors() -> ColorScheme {
    THEME.read().expect("THEME lock not poisoned").colors
}

// ============================================================================
// Badges
// ============================================================================

/// Badge marking one of the three featured offers.
pub fn featured_badge() -> Span<'static> {
    let scheme = colors();
    Span::styled(
        " HOT ",
        Style::default()
            .fg(scheme.badge_fg_light)
            .bg(scheme.featured)
            .bold(),
    )
}

/// Badge showing a discount percentage.
pub fn discount_badge(percent: u8) -> Span<'static> {
    let scheme = colors();
    Span::styled(
        format!(" {percent}% "),
        Style::default()
            .fg(scheme.badge_fg_dark)
            .bg(scheme.discount_color(percent))
            .bold(),
    )
}

/// Badge showing one facet tag in the facet's color.
pub fn tag_badge(kind: FacetKind, label: &str) -> Span<'static> {
    let scheme = colors();
    Span::styled(
        format!(" {label} "),
        Style::default()
            .fg(scheme.badge_fg_light)
            .bg(scheme.facet_color(kind)),
    )
}

/// Badge showing the current page out of the page count.
pub fn page_badge(page: u32, total_pages: u32) -> Span<'static> {
    let scheme = colors();
    Span::styled(
        format!(" {page}/{total_pages} "),
        Style::default()
            .fg(scheme.badge_fg_dark)
            .bg(scheme.accent)
            .bold(),
    )
}

// ============================================================================
// Footer Hints
// ============================================================================

/// Key hints shown in the footer, view-specific first.
pub struct FooterHints;

/// Hints appended to every view's footer.
const GLOBAL_HINTS: [(&str, &str); 5] = [
    ("1/2", "view"),
    ("↑↓/jk", "navigate"),
    ("T", "theme"),
    ("?", "help"),
    ("q", "quit"),
];

impl FooterHints {
    /// Hints for a view, by the names `ui::render_footer` passes.
    #[must_use]
    pub fn for_view(view: &str) -> Vec<(&'static str, &'static str)> {
        let specific: &[(&'static str, &'static str)] = match view {
            "offers" => &[
                ("c", "category"),
                ("o", "organization"),
                ("b", "benefit"),
                ("s", "sort"),
                ("←→", "page"),
                ("Enter", "detail"),
            ],
            "stores" => &[("←→", "page")],
            "detail" => &[("[ ]", "tab"), ("r", "write review"), ("Esc", "back")],
            "review" => &[
                ("Tab", "next field"),
                ("Ctrl+S", "submit"),
                ("Esc", "discard"),
            ],
            _ => &[],
        };
        specific.iter().chain(GLOBAL_HINTS.iter()).copied().collect()
    }
}

/// Render footer hints as spans
pub fn render_footer_hints(hints: &[(&str, &str)]) -> Vec<Span<'static>> {
    let scheme = colors();
    let mut spans = Vec::with_capacity(hints.len() * 3);

    for (i, (key, desc)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" "));
        }
        spans.push(Span::styled(
            format!("[{key}]"),
            Style::default().fg(scheme.accent),
        ));
        spans.push(Span::styled(
            (*desc).to_string(),
            Style::default().fg(scheme.text_muted),
        ));
    }

    spans
}
