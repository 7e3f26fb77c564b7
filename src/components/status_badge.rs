use freela_api::models::{ContractStatus, JobStatus, PaymentStatus, ProposalStatus, ReportStatus};
use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Positive,
    Negative,
    Pending,
    Neutral,
}

/// Anything rendered as a coloured status pill.
pub trait Badge: Copy {
    fn label(self) -> &'static str;
    fn tone(self) -> Tone;
}

impl Badge for JobStatus {
    fn label(self) -> &'static str {
        JobStatus::label(self)
    }

    fn tone(self) -> Tone {
        match self {
            JobStatus::Aberto => Tone::Positive,
            JobStatus::EmAndamento => Tone::Pending,
            JobStatus::Concluido => Tone::Neutral,
            JobStatus::Cancelado => Tone::Negative,
        }
    }
}

impl Badge for ProposalStatus {
    fn label(self) -> &'static str {
        ProposalStatus::label(self)
    }

    fn tone(self) -> Tone {
        match self {
            ProposalStatus::Pendente => Tone::Pending,
            ProposalStatus::Aceita => Tone::Positive,
            ProposalStatus::Recusada => Tone::Negative,
        }
    }
}

impl Badge for ContractStatus {
    fn label(self) -> &'static str {
        ContractStatus::label(self)
    }

    fn tone(self) -> Tone {
        match self {
            ContractStatus::Ativo => Tone::Pending,
            ContractStatus::Concluido => Tone::Positive,
            ContractStatus::Cancelado => Tone::Negative,
        }
    }
}

impl Badge for PaymentStatus {
    fn label(self) -> &'static str {
        PaymentStatus::label(self)
    }

    fn tone(self) -> Tone {
        match self {
            PaymentStatus::Pendente => Tone::Pending,
            PaymentStatus::Aprovado => Tone::Positive,
            PaymentStatus::Recusado | PaymentStatus::Cancelado => Tone::Negative,
            PaymentStatus::Reembolsado => Tone::Neutral,
        }
    }
}

impl Badge for ReportStatus {
    fn label(self) -> &'static str {
        ReportStatus::label(self)
    }

    fn tone(self) -> Tone {
        match self {
            ReportStatus::Pendente | ReportStatus::EmAnalise => Tone::Pending,
            ReportStatus::Resolvida => Tone::Positive,
            ReportStatus::Rejeitada => Tone::Neutral,
        }
    }
}

#[component]
pub fn StatusBadge<S: Badge + 'static>(status: S) -> impl IntoView {
    let class = match status.tone() {
        Tone::Positive => "status-badge status-positive",
        Tone::Negative => "status-badge status-negative",
        Tone::Pending => "status-badge status-pending",
        Tone::Neutral => "status-badge status-neutral",
    };

    view! { <span class=class>{status.label()}</span> }
}
