use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pendente,
    EmAnalise,
    Resolvida,
    Rejeitada,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 4] = [
        ReportStatus::Pendente,
        ReportStatus::EmAnalise,
        ReportStatus::Resolvida,
        ReportStatus::Rejeitada,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ReportStatus::Pendente => "Pendente",
            ReportStatus::EmAnalise => "Em análise",
            ReportStatus::Resolvida => "Resolvida",
            ReportStatus::Rejeitada => "Rejeitada",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReportStatus::Pendente => "pendente",
            ReportStatus::EmAnalise => "em_analise",
            ReportStatus::Resolvida => "resolvida",
            ReportStatus::Rejeitada => "rejeitada",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Fraude,
    Assedio,
    ConteudoImproprio,
    Spam,
    Outro,
}

impl ReportKind {
    pub const ALL: [ReportKind; 5] = [
        ReportKind::Fraude,
        ReportKind::Assedio,
        ReportKind::ConteudoImproprio,
        ReportKind::Spam,
        ReportKind::Outro,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ReportKind::Fraude => "Fraude",
            ReportKind::Assedio => "Assédio",
            ReportKind::ConteudoImproprio => "Conteúdo impróprio",
            ReportKind::Spam => "Spam",
            ReportKind::Outro => "Outro",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReportKind::Fraude => "fraude",
            ReportKind::Assedio => "assedio",
            ReportKind::ConteudoImproprio => "conteudo_improprio",
            ReportKind::Spam => "spam",
            ReportKind::Outro => "outro",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == raw)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PunishmentKind {
    Advertencia,
    Suspensao,
    Banimento,
}

impl PunishmentKind {
    pub fn label(self) -> &'static str {
        match self {
            PunishmentKind::Advertencia => "Advertência",
            PunishmentKind::Suspensao => "Suspensão",
            PunishmentKind::Banimento => "Banimento",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PunishmentKind::Advertencia => "advertencia",
            PunishmentKind::Suspensao => "suspensao",
            PunishmentKind::Banimento => "banimento",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    pub denunciante: i64,
    #[serde(default)]
    pub denunciante_nome: Option<String>,
    pub denunciado: i64,
    #[serde(default)]
    pub denunciado_nome: Option<String>,
    pub tipo: ReportKind,
    pub motivo: String,
    pub status: ReportStatus,
    #[serde(default)]
    pub resposta_admin: Option<String>,
    /// Punishment currently in force because of this report.
    #[serde(default)]
    pub punicao_aplicada: Option<PunishmentKind>,
    #[serde(default)]
    pub data_criacao: Option<DateTime<Utc>>,
}

impl Report {
    pub fn is_open(&self) -> bool {
        matches!(self.status, ReportStatus::Pendente | ReportStatus::EmAnalise)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_matches_wire_names() {
        for status in ReportStatus::ALL {
            assert_eq!(ReportStatus::parse(status.as_str()), Some(status));
            let wire = serde_json::to_string(&status).unwrap();
            assert_eq!(wire, format!("\"{}\"", status.as_str()));
        }
        assert_eq!(ReportStatus::parse("arquivada"), None);
    }

    #[test]
    fn test_kind_parse_matches_wire_names() {
        for kind in ReportKind::ALL {
            let wire = serde_json::to_string(&kind).unwrap();
            assert_eq!(wire, format!("\"{}\"", kind.as_str()));
            assert_eq!(ReportKind::parse(kind.as_str()), Some(kind));
        }
    }
}
