//! Interactive intake prompts.
//!
//! Every answer goes through [`IntakeForm::update_field`], so the terminal
//! applies the same coercion rules as the desktop form. A blank answer keeps
//! the value shown in brackets.

use std::io::{BufRead, Write};

use estimate_core::form::{Field, IntakeForm};
use estimate_core::request::{Phase, Platform, YesNo};

/// Read one answer; `None` on end of input or a broken terminal.
fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> Option<String> {
    write!(output, "{}", prompt).ok()?;
    output.flush().ok()?;

    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}

/// Ask for every editable field in form order.
pub fn fill_form<R: BufRead, W: Write>(form: &mut IntakeForm, input: &mut R, output: &mut W) {
    for field in Field::ALL {
        if field == Field::ScreenCount {
            continue;
        }
        if field.is_screen_count() && !form.screen_inputs_enabled() {
            continue;
        }
        if !prompt_field(form, field, input, output) {
            tracing::debug!(field = field.name(), "input closed, keeping remaining defaults");
            break;
        }
    }
}

/// Prompt for one field; false once input is exhausted.
fn prompt_field<R: BufRead, W: Write>(
    form: &mut IntakeForm,
    field: Field,
    input: &mut R,
    output: &mut W,
) -> bool {
    let request = form.request();
    let (hint, current) = match field {
        Field::Platform => (
            format!(" ({})", names(&Platform::ALL.map(|p| p.display_name()))),
            names(&request.platform.iter().map(|p| p.display_name()).collect::<Vec<_>>()),
        ),
        Field::Phases => (
            format!(" ({})", names(&Phase::ALL.map(|p| p.display_name()))),
            names(&request.phases.iter().map(|p| p.display_name()).collect::<Vec<_>>()),
        ),
        Field::EstimateScreens => (
            " (y/n)".to_string(),
            if request.estimate_screens { "y" } else { "n" }.to_string(),
        ),
        Field::Branding | Field::Accessibility | Field::Multilingual => {
            (" (Yes/No)".to_string(), choice(form, field).display_name().to_string())
        }
        Field::Timeline => (
            String::new(),
            request.timeline.map(|w| w.to_string()).unwrap_or_default(),
        ),
        _ => (String::new(), current_text(form, field)),
    };

    let prompt = format!("{}{} [{}]: ", prompt_label(field), hint, current);
    let Some(answer) = prompt_line(input, output, &prompt) else {
        return false;
    };
    if answer.is_empty() {
        return true;
    }

    match field {
        Field::Platform => {
            select_exactly(form, field, &answer, &Platform::ALL.map(|p| p.display_name()))
        }
        Field::Phases => {
            select_exactly(form, field, &answer, &Phase::ALL.map(|p| p.display_name()))
        }
        _ => form.update_field(field, answer),
    }
    true
}

/// Toggle set members so the selection matches the comma-separated answer.
fn select_exactly(form: &mut IntakeForm, field: Field, answer: &str, options: &[&str]) {
    let wanted: Vec<String> = answer
        .split(',')
        .map(|s| s.trim().to_ascii_lowercase())
        .filter(|s| !s.is_empty())
        .collect();

    for option in options {
        let selected = match field {
            Field::Platform => form.request().platform.iter().any(|p| p.display_name() == *option),
            _ => form.request().phases.iter().any(|p| p.display_name() == *option),
        };
        if selected != wanted.contains(&option.to_ascii_lowercase()) {
            form.update_field(field, *option);
        }
    }

    for name in &wanted {
        if !options.iter().any(|o| o.to_ascii_lowercase() == *name) {
            tracing::warn!(field = field.name(), value = %name, "ignoring unknown option");
        }
    }
}

fn prompt_label(field: Field) -> String {
    match field {
        Field::UniqueEasy | Field::UniqueMedium | Field::UniqueComplex => {
            format!("Unique Screens ({})", field.label())
        }
        Field::OtherEasy | Field::OtherMedium | Field::OtherComplex => {
            format!("Other Screens ({})", field.label())
        }
        _ => field.label().to_string(),
    }
}

fn choice(form: &IntakeForm, field: Field) -> YesNo {
    let request = form.request();
    match field {
        Field::Branding => request.branding,
        Field::Accessibility => request.accessibility,
        _ => request.multilingual,
    }
}

fn current_text(form: &IntakeForm, field: Field) -> String {
    let request = form.request();
    match field {
        Field::ProjectName => request.project_name.clone(),
        Field::Features => request.features.clone(),
        Field::Domain => request.domain.clone(),
        Field::Industry => request.industry.clone(),
        Field::Notes => request.notes.clone(),
        Field::UniqueEasy => request.unique_easy.to_string(),
        Field::UniqueMedium => request.unique_medium.to_string(),
        Field::UniqueComplex => request.unique_complex.to_string(),
        Field::OtherEasy => request.other_easy.to_string(),
        Field::OtherMedium => request.other_medium.to_string(),
        Field::OtherComplex => request.other_complex.to_string(),
        _ => String::new(),
    }
}

fn names(items: &[&str]) -> String {
    items.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(answers: &str) -> IntakeForm {
        let mut form = IntakeForm::new();
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut output = Vec::new();
        fill_form(&mut form, &mut input, &mut output);
        form
    }

    #[test]
    fn test_prompts_fill_the_form() {
        // name, platform, features, estimate?, 6 counts, domain, industry,
        // phases, branding, accessibility, multilingual, timeline, notes
        let answers = [
            "Atlas",
            "Android App, iOS App",
            "Login, Payments",
            "n",
            "2",
            "1",
            "",
            "3",
            "",
            "",
            "Fintech",
            "Banking",
            "Discovery, Prototyping",
            "Yes",
            "",
            "no",
            "8",
            "Tight deadline",
        ]
        .map(|line| format!("{}\n", line))
        .concat();
        let form = run(&answers);
        let request = form.request();

        assert_eq!(request.project_name, "Atlas");
        assert_eq!(request.platform, vec![Platform::AndroidApp, Platform::IosApp]);
        assert_eq!(request.screen_count, 6);
        assert_eq!(request.domain, "Fintech");
        assert_eq!(request.phases, vec![Phase::Discovery, Phase::Prototyping]);
        assert_eq!(request.branding, YesNo::Yes);
        assert_eq!(request.accessibility, YesNo::No);
        assert_eq!(request.timeline, Some(8));
        assert_eq!(request.notes, "Tight deadline");
    }

    #[test]
    fn test_estimated_screens_skip_count_prompts() {
        let answers = "Atlas\n\n\ny\nFintech\n";
        let form = run(answers);
        assert!(form.request().estimate_screens);
        assert_eq!(form.request().domain, "Fintech");
        assert_eq!(form.request().screen_count, 0);
    }

    #[test]
    fn test_end_of_input_keeps_defaults() {
        let form = run("Atlas\n");
        assert_eq!(form.request().project_name, "Atlas");
        assert_eq!(form.request().phases, Phase::DEFAULT_SELECTION.to_vec());
    }

    #[test]
    fn test_prompt_shows_current_value() {
        let mut form = IntakeForm::new();
        let mut input = Cursor::new(b"\n".to_vec());
        let mut output = Vec::new();
        prompt_field(&mut form, Field::Phases, &mut input, &mut output);
        let shown = String::from_utf8(output).unwrap();
        assert!(shown.contains("[Discovery, Wireframing, UI Design]"));
    }
}
