//! Step-by-step terminal questionnaire.
//!
//! Each question shows its options and the current answer in brackets;
//! pressing Enter keeps it. Unparseable input is reported and asked again.
//! End of input accepts the remaining defaults.

use std::collections::BTreeSet;
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;

use floor_core::answers::{Answer, Answers, Choice, ContactDetails, FlooringType, NOT_SURE};
use floor_core::errors::{EstimateError, EstimateResult};

pub const TOTAL_STEPS: usize = 10;

pub struct Questionnaire<R, W> {
    input: R,
    output: W,
    exhausted: bool,
}

impl<R: BufRead, W: Write> Questionnaire<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Questionnaire {
            input,
            output,
            exhausted: false,
        }
    }

    /// Walk through every step, starting from `answers`.
    pub fn run(&mut self, mut answers: Answers) -> Answers {
        self.step(1, "Which flooring product are you interested in?");
        answers.product = self.choose("Product", answers.product);

        self.step(2, "Bedrooms");
        let prompt = format!(
            "How many bedrooms are getting new floors? [{}]: ",
            answers.bedrooms_count
        );
        answers.bedrooms_count = self.ask(&prompt, answers.bedrooms_count);
        answers.bedroom_size = self.choose("Typical bedroom size", answers.bedroom_size);

        self.step(3, "Living spaces");
        answers.living_count = self.choose_answer("How many living spaces?", answers.living_count);
        answers.living_size = self.choose_answer("Living space size", answers.living_size);

        self.step(4, "Kitchen");
        answers.include_kitchen = self.yes_no("Include the kitchen?", answers.include_kitchen);
        if answers.include_kitchen {
            answers.kitchen_size = self.choose_answer("Kitchen size", answers.kitchen_size);
        }

        self.step(5, "Hallways");
        answers.include_hallways = self.yes_no("Include hallways?", answers.include_hallways);

        self.step(6, "Stairs");
        answers.stairs_band = self.choose("Stairs", answers.stairs_band);

        self.step(7, "Subfloor");
        answers.floor_evenness = self.choose("How even are the floors?", answers.floor_evenness);

        self.step(8, "Current flooring");
        answers.current_flooring = self.flooring(&answers.current_flooring);

        self.step(9, "Finishing");
        answers.finish_type = self.choose_answer("Edge finish", answers.finish_type);

        self.step(10, "Your details");
        answers.contact = self.contact(answers.contact);

        answers
    }

    fn step(&mut self, number: usize, title: &str) {
        let _ = writeln!(self.output);
        let _ = writeln!(self.output, "Step {}/{}: {}", number, TOTAL_STEPS, title);
    }

    fn read_line(&mut self, prompt: &str) -> Option<String> {
        if self.exhausted {
            return None;
        }
        let _ = write!(self.output, "{}", prompt);
        if self.output.flush().is_err() {
            return None;
        }

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => {
                self.exhausted = true;
                None
            }
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    /// Ask until the reply parses; Enter or end of input keeps `current`.
    fn ask<T>(&mut self, prompt: &str, current: T) -> T
    where
        T: FromStr,
        T::Err: Display,
    {
        loop {
            let Some(reply) = self.read_line(prompt) else {
                return current;
            };
            if reply.is_empty() {
                return current;
            }
            match reply.parse() {
                Ok(value) => return value,
                Err(e) => {
                    let _ = writeln!(self.output, "  {}", e);
                }
            }
        }
    }

    /// `Question [a / b / c] [current]: ` with the option codes
    fn choose<T: Choice>(&mut self, question: &str, current: T) -> T {
        let prompt = format!("{} [{}] [{}]: ", question, option_list::<T>(), current.code());
        self.ask(&prompt, current)
    }

    /// Like [`Self::choose`], with `not_sure` as an extra option
    fn choose_answer<T: Choice>(&mut self, question: &str, current: Answer<T>) -> Answer<T> {
        let prompt = format!(
            "{} [{} / {}] [{}]: ",
            question,
            option_list::<T>(),
            NOT_SURE,
            current.code()
        );
        self.ask(&prompt, current)
    }

    fn yes_no(&mut self, question: &str, current: bool) -> bool {
        loop {
            let prompt = format!("{} [{}]: ", question, if current { "yes" } else { "no" });
            let Some(reply) = self.read_line(&prompt) else {
                return current;
            };
            match reply.to_lowercase().as_str() {
                "" => return current,
                "y" | "yes" => return true,
                "n" | "no" => return false,
                _ => {
                    let _ = writeln!(self.output, "  Please answer yes or no");
                }
            }
        }
    }

    fn flooring(&mut self, current: &BTreeSet<FlooringType>) -> BTreeSet<FlooringType> {
        let shown = if current.is_empty() {
            "none".to_string()
        } else {
            current.iter().map(|t| t.code()).collect::<Vec<_>>().join(", ")
        };
        let prompt = format!(
            "What's on the floors now? Comma separated [{}] [{}]: ",
            option_list::<FlooringType>(),
            shown
        );
        loop {
            let Some(reply) = self.read_line(&prompt) else {
                return current.clone();
            };
            if reply.is_empty() {
                return current.clone();
            }
            match parse_flooring(&reply) {
                Ok(set) => return set,
                Err(e) => {
                    let _ = writeln!(self.output, "  {}", e);
                }
            }
        }
    }

    fn contact(&mut self, current: ContactDetails) -> ContactDetails {
        ContactDetails {
            name: self.required("Full name", current.name),
            suburb: self.required("Suburb", current.suburb),
            mobile: self.required("Mobile", current.mobile),
            email: self.required("Email", current.email),
        }
    }

    /// Re-ask until non-empty; end of input gives up and keeps `current`.
    fn required(&mut self, label: &str, current: String) -> String {
        loop {
            let prompt = if current.trim().is_empty() {
                format!("{}: ", label)
            } else {
                format!("{} [{}]: ", label, current)
            };
            let Some(reply) = self.read_line(&prompt) else {
                return current;
            };
            if !reply.is_empty() {
                return reply;
            }
            if !current.trim().is_empty() {
                return current;
            }
            let _ = writeln!(self.output, "  {} is required", label);
        }
    }
}

fn option_list<T: Choice>() -> String {
    T::options()
        .iter()
        .map(|option| option.code())
        .collect::<Vec<_>>()
        .join(" / ")
}

/// `"tiles, carpet"` -> {Carpet, Tiles}; `"none"` -> {}
pub fn parse_flooring(reply: &str) -> EstimateResult<BTreeSet<FlooringType>> {
    if reply.trim().eq_ignore_ascii_case("none") {
        return Ok(BTreeSet::new());
    }
    reply
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(FlooringType::from_str_flexible)
        .collect::<Result<BTreeSet<_>, EstimateError>>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use floor_core::answers::{FinishType, FloorEvenness, ProductType, RoomSize, StairsBand};
    use std::io::Cursor;

    fn run_with(input: &str) -> (Answers, String) {
        let mut output = Vec::new();
        let answers = {
            let reader = Cursor::new(input.as_bytes());
            let mut questionnaire = Questionnaire::new(reader, &mut output);
            questionnaire.run(Answers::default())
        };
        (answers, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_defaults_on_enter() {
        let input = "\n".repeat(12) + "Sam\nFitzroy\n0400\nsam@example.com\n";
        let (answers, output) = run_with(&input);

        assert_eq!(answers.product, ProductType::HybridPlus);
        assert_eq!(answers.bedrooms_count, 3);
        assert!(answers.current_flooring.is_empty());
        assert_eq!(answers.contact.name, "Sam");
        assert_eq!(answers.contact.email, "sam@example.com");
        assert!(output.contains("Step 10/10: Your details"));
    }

    #[test]
    fn test_full_answers() {
        let input = [
            "cloudstep",
            "4",
            "large",
            "not sure",
            "not sure",
            "no",
            "yes",
            "15-17",
            "very uneven",
            "tiles, carpet",
            "skirting",
            "Sam",
            "Fitzroy",
            "0400",
            "sam@example.com",
        ]
        .join("\n");
        let (answers, _) = run_with(&input);

        assert_eq!(answers.product, ProductType::CloudStep);
        assert_eq!(answers.bedrooms_count, 4);
        assert_eq!(answers.bedroom_size, RoomSize::Large);
        assert!(answers.living_count.is_unspecified());
        assert!(answers.living_size.is_unspecified());
        assert!(!answers.include_kitchen);
        assert!(answers.include_hallways);
        assert_eq!(answers.stairs_band, StairsBand::Steps15To17);
        assert_eq!(answers.floor_evenness, FloorEvenness::VeryUneven);
        assert_eq!(
            answers.current_flooring,
            [FlooringType::Carpet, FlooringType::Tiles].into_iter().collect()
        );
        assert_eq!(answers.finish_type, Answer::Explicit(FinishType::Skirting));
        assert!(answers.contact.validate().is_ok());
    }

    #[test]
    fn test_prompts_list_option_codes() {
        let (_, output) = run_with(&"\n".repeat(12));

        assert!(output.contains("Product [8H / HybridPlus / CloudStep] [HybridPlus]: "));
        assert!(output.contains("[none / 1 / 2 / 3+ / not_sure] [2]: "));
        assert!(output.contains("Stairs [none / 12_14 / 15_17 / 18_20 / 20_plus] [none]: "));
        let evenness = "[mostly_even / little_uneven / very_uneven / not_sure] [mostly_even]: ";
        assert!(output.contains(evenness));
        assert!(output.contains("[carpet / tiles / floorboards / concrete / not_sure] [none]: "));
        assert!(output.contains("Edge finish [scotia / skirting / not_sure] [scotia]: "));
    }

    #[test]
    fn test_typing_shown_default_keeps_it() {
        let input = [
            "HybridPlus",
            "3",
            "medium",
            "2",
            "medium",
            "yes",
            "medium",
            "yes",
            "none",
            "mostly_even",
            "none",
            "scotia",
        ]
        .join("\n");
        let (answers, output) = run_with(&input);

        assert_eq!(answers, Answers::default());
        assert!(!output.contains("Invalid input"));
    }

    #[test]
    fn test_invalid_reply_is_asked_again() {
        let input = "marble\n8h\n";
        let (answers, output) = run_with(input);

        assert_eq!(answers.product, ProductType::EightH);
        assert!(output.contains("Invalid input for 'product'"));
    }

    #[test]
    fn test_blank_contact_is_asked_again() {
        let input = "\n".repeat(12) + "\nSam\n";
        let (answers, output) = run_with(&input);

        assert_eq!(answers.contact.name, "Sam");
        assert!(output.contains("Full name is required"));
        // Input ran out: the remaining fields stay blank
        assert_eq!(answers.contact.missing_fields(), vec!["suburb", "mobile", "email"]);
    }

    #[test]
    fn test_parse_flooring() {
        assert!(parse_flooring("none").unwrap().is_empty());
        let set = parse_flooring("Tiles, not sure ,carpet").unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.contains(&FlooringType::NotSure));
        assert!(parse_flooring("tiles, lino").is_err());
    }
}
