//! System prompts for the assistant persona
//!
//! One fixed template per display language, parameterized only by the
//! current date. The language directive lives here; everything else about
//! a turn is carried in the user message.

use crate::language::Language;
use chrono::NaiveDate;

/// Build the assistant system prompt for a language and date
pub fn system_prompt(language: Language, date: NaiveDate) -> String {
    match language {
        Language::Portuguese => format!(
            "Você é Arash+, um assistente financeiro especializado.\n\
             Data atual: {date}.\n\
             Seja direto, técnico e baseie suas respostas nos dados fornecidos.\n\
             Sempre cite as fontes quando usar informações externas.\n\
             Responda em português."
        ),
        Language::English => format!(
            "You are Arash+, a specialized financial assistant.\n\
             Current date: {date}.\n\
             Be direct, technical and base your answers on the provided data.\n\
             Always cite sources when using external information.\n\
             Respond in English."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_carries_date_and_language_directive() {
        let date: NaiveDate = "2024-06-01".parse().unwrap();

        let pt = system_prompt(Language::Portuguese, date);
        assert!(pt.contains("2024-06-01"));
        assert!(pt.contains("Responda em português."));

        let en = system_prompt(Language::English, date);
        assert!(en.contains("2024-06-01"));
        assert!(en.contains("Respond in English."));
    }

    #[test]
    fn test_prompt_instructs_source_citation() {
        let date: NaiveDate = "2024-06-01".parse().unwrap();
        assert!(system_prompt(Language::English, date).contains("cite sources"));
    }
}
