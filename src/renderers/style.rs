use serde::{Deserialize, Serialize};

use crate::render::Color;

fn default_background() -> Color {
    Color::rgb8(255, 255, 255)
}

fn default_grid() -> Color {
    Color::rgb8(238, 240, 243)
}

fn default_up() -> Color {
    Color::rgb8(239, 83, 80)
}

fn default_down() -> Color {
    Color::rgb8(38, 166, 154)
}

fn default_text() -> Color {
    Color::rgb8(70, 76, 88)
}

fn default_border() -> Color {
    Color::rgb8(210, 214, 220)
}

fn default_crosshair() -> Color {
    Color::rgb8(120, 123, 134)
}

fn default_label_background() -> Color {
    Color::rgb8(55, 61, 73)
}

fn default_label_text() -> Color {
    Color::rgb8(255, 255, 255)
}

fn default_moving_average_colors() -> Vec<Color> {
    vec![
        Color::rgb8(255, 152, 0),
        Color::rgb8(33, 150, 243),
        Color::rgb8(156, 39, 176),
        Color::rgb8(76, 175, 80),
    ]
}

fn default_font_size() -> f64 {
    11.0
}

fn default_volume_alpha() -> f64 {
    0.6
}

fn default_time_label_spacing() -> f64 {
    80.0
}

fn default_main_price_ticks() -> usize {
    6
}

fn default_sub_price_ticks() -> usize {
    2
}

/// Colors and text sizes shared by every renderer.
///
/// Rising candles use `up_color`; by default that is red, the convention of
/// mainland China quotes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartStyle {
    #[serde(default = "default_background")]
    pub background: Color,
    #[serde(default = "default_grid")]
    pub grid_color: Color,
    #[serde(default = "default_up")]
    pub up_color: Color,
    #[serde(default = "default_down")]
    pub down_color: Color,
    #[serde(default = "default_text")]
    pub text_color: Color,
    #[serde(default = "default_border")]
    pub border_color: Color,
    #[serde(default = "default_crosshair")]
    pub crosshair_color: Color,
    #[serde(default = "default_label_background")]
    pub label_background: Color,
    #[serde(default = "default_label_text")]
    pub label_text_color: Color,
    #[serde(default = "default_moving_average_colors")]
    pub moving_average_colors: Vec<Color>,
    #[serde(default = "default_font_size")]
    pub font_size_px: f64,
    #[serde(default = "default_volume_alpha")]
    pub volume_alpha: f64,
    /// Minimum logical distance between two time axis labels.
    #[serde(default = "default_time_label_spacing")]
    pub time_label_spacing: f64,
    #[serde(default = "default_main_price_ticks")]
    pub main_price_ticks: usize,
    #[serde(default = "default_sub_price_ticks")]
    pub sub_price_ticks: usize,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            background: default_background(),
            grid_color: default_grid(),
            up_color: default_up(),
            down_color: default_down(),
            text_color: default_text(),
            border_color: default_border(),
            crosshair_color: default_crosshair(),
            label_background: default_label_background(),
            label_text_color: default_label_text(),
            moving_average_colors: default_moving_average_colors(),
            font_size_px: default_font_size(),
            volume_alpha: default_volume_alpha(),
            time_label_spacing: default_time_label_spacing(),
            main_price_ticks: default_main_price_ticks(),
            sub_price_ticks: default_sub_price_ticks(),
        }
    }
}

impl ChartStyle {
    #[must_use]
    pub fn candle_color(&self, is_bullish: bool) -> Color {
        if is_bullish {
            self.up_color
        } else {
            self.down_color
        }
    }

    /// Palette entry for the `slot`-th moving average, cycling when the
    /// palette is shorter than the list of periods.
    #[must_use]
    pub fn moving_average_color(&self, slot: usize) -> Color {
        if self.moving_average_colors.is_empty() {
            return self.text_color;
        }
        self.moving_average_colors[slot % self.moving_average_colors.len()]
    }

    /// Rough label width used to lay out text without a font backend.
    #[must_use]
    pub fn estimate_text_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.font_size_px * 0.6
    }
}

#[cfg(test)]
mod tests {
    use super::ChartStyle;

    #[test]
    fn partial_json_keeps_defaults() {
        let style: ChartStyle =
            serde_json::from_str(r#"{"fontSizePx": 13.0}"#).expect("style parses");
        assert_eq!(style.font_size_px, 13.0);
        assert_eq!(style.up_color, ChartStyle::default().up_color);
    }

    #[test]
    fn moving_average_palette_cycles() {
        let style = ChartStyle::default();
        let len = style.moving_average_colors.len();
        assert_eq!(style.moving_average_color(len), style.moving_average_color(0));
    }
}
