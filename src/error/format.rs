use crate::error::{ErrorContext, PackagingError, get_exit_code};

pub fn format_error_chain(error: &PackagingError) -> String {
    let context = ErrorContext::new(error);
    context.to_string()
}

/// Short label for the class of failure, keyed on the exit code.
pub fn error_kind(error: &PackagingError) -> &'static str {
    match get_exit_code(error) {
        2 => "invalid input",
        3 => "configuration",
        4 => "classification",
        _ => "internal",
    }
}

struct Palette {
    heading: &'static str,
    label: &'static str,
    bullet: &'static str,
    bold: &'static str,
    reset: &'static str,
}

impl Palette {
    fn new(use_color: bool) -> Self {
        if use_color {
            Self {
                heading: "\x1b[31m",
                label: "\x1b[33m",
                bullet: "\x1b[36m",
                bold: "\x1b[1m",
                reset: "\x1b[0m",
            }
        } else {
            Self {
                heading: "",
                label: "",
                bullet: "",
                bold: "",
                reset: "",
            }
        }
    }
}

/// Terminal rendering: the error kind in the heading, then details and one
/// bullet per suggestion line.
pub fn format_error_with_color(error: &PackagingError, use_color: bool) -> String {
    let Palette {
        heading,
        label,
        bullet,
        bold,
        reset,
    } = Palette::new(use_color);
    let context = ErrorContext::new(error);
    let kind = error_kind(error);

    let mut output = format!("{heading}{bold}Error ({kind}):{reset} {error}\n");

    if let Some(details) = &context.details {
        output.push_str(&format!("\n{label}{bold}Details:{reset}\n{details}\n"));
    }

    if let Some(suggestion) = &context.suggestion {
        output.push_str(&format!("\n{label}{bold}Suggestions:{reset}\n"));
        let lines = suggestion.lines().map(str::trim).filter(|line| !line.is_empty());
        for line in lines {
            output.push_str(&format!("{bullet}• {line}{reset}\n"));
        }
    }

    // Terminal state must not leak into whatever prints next
    if use_color {
        output.push_str(reset);
    }
    output
}
