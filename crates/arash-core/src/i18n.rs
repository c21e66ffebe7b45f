//! Localized UI labels
//!
//! One table for both display languages. Keep entries short; longer
//! bilingual text (system prompt, analysis template) lives next to its
//! consumer.

use crate::language::Language;

/// Keys for localized UI strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    PageTitle,
    PageCaption,
    CurrentPrices,
    RecentNews,
    Analyzing,
    DetailedAnalysis,
    LoadingData,
    ErrorLoading,
    LastClose,
    PeriodChange,
    Maximum,
    Minimum,
    RecentRows,
    Answer,
    ConfigureApi,
    ChatPlaceholder,
    QuestionPlaceholder,
    HistoryCleared,
}

/// Look up a localized label
pub fn text(language: Language, label: Label) -> &'static str {
    match language {
        Language::Portuguese => match label {
            Label::PageTitle => "Assistente Financeiro",
            Label::PageCaption => "Assistente financeiro inteligente com análise de mercado",
            Label::CurrentPrices => "**Preços Atuais:**",
            Label::RecentNews => "**Notícias Recentes:**",
            Label::Analyzing => "Analisando...",
            Label::DetailedAnalysis => "Análise Detalhada de Ativo",
            Label::LoadingData => "Carregando dados...",
            Label::ErrorLoading => "Não foi possível obter dados para este ticker e período",
            Label::LastClose => "Último Fechamento",
            Label::PeriodChange => "Variação Período",
            Label::Maximum => "Máxima",
            Label::Minimum => "Mínima",
            Label::RecentRows => "Dados recentes",
            Label::Answer => "Resposta:",
            Label::ConfigureApi => "Configure sua API key",
            Label::ChatPlaceholder => "Ex: Como está o preço de AAPL e qual a perspectiva?",
            Label::QuestionPlaceholder => "Ex: Qual a tendência do preço?",
            Label::HistoryCleared => "Histórico limpo",
        },
        Language::English => match label {
            Label::PageTitle => "Finance Assistant",
            Label::PageCaption => "Intelligent financial assistant with market analysis",
            Label::CurrentPrices => "**Current Prices:**",
            Label::RecentNews => "**Recent News:**",
            Label::Analyzing => "Analyzing...",
            Label::DetailedAnalysis => "Detailed Asset Analysis",
            Label::LoadingData => "Loading data...",
            Label::ErrorLoading => "Unable to fetch data for this ticker and period",
            Label::LastClose => "Last Close",
            Label::PeriodChange => "Period Change",
            Label::Maximum => "Maximum",
            Label::Minimum => "Minimum",
            Label::RecentRows => "Recent data",
            Label::Answer => "Answer:",
            Label::ConfigureApi => "Configure your API key",
            Label::ChatPlaceholder => "Ex: What's the price of AAPL and what's the outlook?",
            Label::QuestionPlaceholder => "Ex: What's the price trend?",
            Label::HistoryCleared => "History cleared",
        },
    }
}

/// Localized user-facing error string
pub fn error_message(language: Language, detail: &str) -> String {
    match language {
        Language::Portuguese => format!("Erro: {detail}"),
        Language::English => format!("Error: {detail}"),
    }
}

/// Localized "data loaded" confirmation
pub fn data_loaded(language: Language, count: usize) -> String {
    match language {
        Language::Portuguese => format!("Dados carregados: {count} registros"),
        Language::English => format!("Data loaded: {count} records"),
    }
}
