use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub segment_even: Srgba<f64>,
    pub segment_odd: Srgba<f64>,
    /// Last segment of an odd count, which would otherwise match its neighbour.
    pub segment_extra: Srgba<f64>,
    pub outline: Srgba<f64>,
    pub pointer: Srgba<f64>,
    pub text: Srgba<f64>,
    pub hub: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            segment_even: Self::lookup_color(
                context,
                "theme_base_color",
                Srgba::new(0.96, 0.96, 0.96, 1.0),
                None,
            ),
            segment_odd: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                Srgba::new(0.4, 0.4, 0.8, 0.35),
                Some(0.35),
            ),
            segment_extra: Self::lookup_color(
                context,
                "success_color",
                Srgba::new(0.2, 0.6, 0.3, 0.3),
                Some(0.3),
            ),
            outline: Self::lookup_color(
                context,
                "borders",
                Srgba::new(0.0, 0.0, 0.0, 1.0),
                None,
            ),
            pointer: Self::lookup_color(
                context,
                "error_color",
                Srgba::new(0.85, 0.1, 0.1, 1.0),
                Some(1.0),
            ),
            text: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.1, 0.1, 0.1, 1.0),
                None,
            ),
            hub: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.2, 0.2, 0.2, 0.9),
                Some(0.9),
            ),
        }
    }

    /// Fill for segment `index` of `count`, never giving two neighbours the same color.
    pub fn segment(&self, index: usize, count: usize) -> Srgba<f64> {
        if count > 1 && count % 2 == 1 && index == count - 1 {
            self.segment_extra
        } else if index % 2 == 0 {
            self.segment_even
        } else {
            self.segment_odd
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.tonight-result {
    font-size: 20pt;
    font-weight: 500;
}

.tonight-start {
    font-size: 14pt;
    padding: 6px 24px;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
