use crate::config::TextFitConfig;
use crate::text_metrics::TextMeasure;

#[derive(Debug, Clone, PartialEq)]
pub struct FittedText {
    pub font_size: f32,
    pub lines: Vec<String>,
}

impl FittedText {
    pub fn block_height(&self, line_height: f32) -> f32 {
        self.lines.len() as f32 * self.font_size * line_height
    }
}

/// Finds the largest font size, stepping down from `max_font_size`, at which
/// the greedily wrapped text fits inside `max_width` x `max_height`.
///
/// At `min_font_size` the wrapping is returned as-is even if it overflows.
pub fn fit_text(
    text: &str,
    max_width: f32,
    max_height: f32,
    measure: &dyn TextMeasure,
    config: &TextFitConfig,
) -> FittedText {
    let (min_size, max_size, step) = normalized_sizes(config);
    let line_height = if config.line_height > 0.0 {
        config.line_height
    } else {
        1.0
    };
    let paragraphs = split_lines(text);
    if paragraphs.iter().all(|p| p.is_empty()) {
        return FittedText {
            font_size: max_size,
            lines: Vec::new(),
        };
    }

    // Sizes are derived from an integer step count so a step below the
    // float resolution of `max_size` cannot stall the search.
    let span = max_size - min_size;
    let (steps, step) = match (span / step).ceil() {
        count if count > MAX_FIT_STEPS as f32 => (MAX_FIT_STEPS, span / MAX_FIT_STEPS as f32),
        count => (count as usize, step),
    };
    for idx in 0..steps {
        let font_size = (max_size - idx as f32 * step).max(min_size);
        let lines = wrap_paragraphs(&paragraphs, max_width, font_size, measure);
        let height = lines.len() as f32 * font_size * line_height;
        let fits_width = lines
            .iter()
            .all(|line| measure.line_width(line, font_size) <= max_width);
        if height <= max_height && fits_width {
            return FittedText { font_size, lines };
        }
    }
    FittedText {
        font_size: min_size,
        lines: wrap_paragraphs(&paragraphs, max_width, min_size, measure),
    }
}

/// Upper bound on candidate sizes tried before settling on the floor.
const MAX_FIT_STEPS: usize = 256;

fn normalized_sizes(config: &TextFitConfig) -> (f32, f32, f32) {
    let min_size = if config.min_font_size.is_finite() && config.min_font_size > 0.0 {
        config.min_font_size
    } else {
        1.0
    };
    let max_size = if config.max_font_size.is_finite() {
        config.max_font_size.max(min_size)
    } else {
        min_size
    };
    let step = if config.font_size_step.is_finite() && config.font_size_step > 0.0 {
        config.font_size_step
    } else {
        1.0
    };
    (min_size, max_size, step)
}

pub(crate) fn split_lines(text: &str) -> Vec<String> {
    text.replace("<br/>", "\n")
        .replace("<br>", "\n")
        .replace("\\n", "\n")
        .split('\n')
        .map(|line| line.trim().to_string())
        .collect()
}

fn wrap_paragraphs(
    paragraphs: &[String],
    max_width: f32,
    font_size: f32,
    measure: &dyn TextMeasure,
) -> Vec<String> {
    paragraphs
        .iter()
        .filter(|p| !p.is_empty())
        .flat_map(|p| wrap_line(p, max_width, font_size, measure))
        .collect()
}

pub(crate) fn wrap_line(
    line: &str,
    max_width: f32,
    font_size: f32,
    measure: &dyn TextMeasure,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in line.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{} {}", current, word)
        };
        if measure.line_width(&candidate, font_size) > max_width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    // Every char is `font_size` wide.
    fn mono(text: &str, font_size: f32) -> f32 {
        text.chars().count() as f32 * font_size
    }

    fn config() -> TextFitConfig {
        TextFitConfig {
            max_font_size: 20.0,
            min_font_size: 8.0,
            font_size_step: 1.0,
            line_height: 1.0,
        }
    }

    #[test]
    fn short_text_keeps_max_size() {
        let fitted = fit_text("Hub", 100.0, 100.0, &mono, &config());
        assert_eq!(fitted.font_size, 20.0);
        assert_eq!(fitted.lines, vec!["Hub"]);
    }

    #[test]
    fn long_text_shrinks_and_wraps() {
        let fitted = fit_text("Global Widget Holdings", 120.0, 40.0, &mono, &config());
        assert!(fitted.font_size < 20.0);
        assert!(fitted.lines.len() > 1);
        assert!(fitted.block_height(1.0) <= 40.0);
        for line in &fitted.lines {
            assert!(mono(line, fitted.font_size) <= 120.0, "{line:?} overflows");
        }
    }

    #[test]
    fn impossible_text_stops_at_floor() {
        let fitted = fit_text(
            "an extremely verbose primary entity name that will never fit",
            30.0,
            10.0,
            &mono,
            &config(),
        );
        assert_eq!(fitted.font_size, 8.0);
        assert!(!fitted.lines.is_empty());
    }

    #[test]
    fn explicit_breaks_are_kept() {
        let fitted = fit_text("North<br/>South", 500.0, 500.0, &mono, &config());
        assert_eq!(fitted.lines, vec!["North", "South"]);
    }

    #[test]
    fn empty_text_has_no_lines() {
        let fitted = fit_text("   ", 100.0, 100.0, &mono, &config());
        assert!(fitted.lines.is_empty());
        assert_eq!(fitted.font_size, 20.0);
    }

    #[test]
    fn degenerate_config_terminates() {
        let broken = TextFitConfig {
            max_font_size: 4.0,
            min_font_size: 12.0,
            font_size_step: 0.0,
            line_height: 0.0,
        };
        let fitted = fit_text("some words here", 1.0, 1.0, &mono, &broken);
        assert_eq!(fitted.font_size, 12.0);
    }

    #[test]
    fn tiny_step_terminates_at_floor() {
        let tiny = TextFitConfig {
            max_font_size: 20.0,
            min_font_size: 8.0,
            font_size_step: 1e-9,
            line_height: 1.0,
        };
        let fitted = fit_text("never fits in here", 1.0, 1.0, &mono, &tiny);
        assert_eq!(fitted.font_size, 8.0);
        assert_eq!(fitted.lines.len(), 4);
    }

    #[test]
    fn huge_max_size_terminates() {
        let huge = TextFitConfig {
            max_font_size: 1e9,
            min_font_size: 8.0,
            font_size_step: 1.0,
            line_height: 1.0,
        };
        let fitted = fit_text("never fits in here", 1.0, 1.0, &mono, &huge);
        assert_eq!(fitted.font_size, 8.0);

        let fitted = fit_text("Hub", 1000.0, 1000.0, &mono, &huge);
        assert!(fitted.font_size >= 8.0 && fitted.font_size <= 1000.0 / 3.0);
        assert_eq!(fitted.lines, vec!["Hub"]);
    }

    #[test]
    fn wrap_line_greedy() {
        let lines = wrap_line("aa bb cc dd", 5.0, 1.0, &mono);
        assert_eq!(lines, vec!["aa bb", "cc dd"]);
    }
}
