use crate::error::ApiError;

/// What a page should render for one fetched resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPhase {
    /// First fetch still running, nothing to show yet.
    Loading,
    /// First fetch failed, nothing to show; offer a retry.
    Failed,
    /// Data is on screen (an error banner may sit on top of it).
    Ready,
}

/// Page-local copy of a server resource.
///
/// A failed fetch records its message but keeps whatever was loaded
/// before, so the view never blanks out on a transient error.
#[derive(Debug, Clone, PartialEq)]
pub struct Loadable<T> {
    data: Option<T>,
    loading: bool,
    error: Option<String>,
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Self::pending()
    }
}

impl<T> Loadable<T> {
    /// Before the first fetch resolves.
    pub fn pending() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }

    pub fn ready(data: T) -> Self {
        Self {
            data: Some(data),
            loading: false,
            error: None,
        }
    }

    /// A fetch (first load, retry, or poll) has started.
    pub fn begin(&mut self) {
        self.loading = true;
    }

    /// Record the outcome of a fetch. Cancelled fetches change nothing.
    pub fn resolve(&mut self, result: Result<T, ApiError>) {
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            Err(ApiError::Cancelled) => {}
            Err(e) => self.error = Some(e.user_message()),
        }
        self.loading = false;
    }

    /// Apply a local change after a successful mutation.
    pub fn patch(&mut self, f: impl FnOnce(&mut T)) {
        if let Some(data) = self.data.as_mut() {
            f(data);
        }
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn phase(&self) -> ViewPhase {
        match (&self.data, &self.error) {
            (Some(_), _) => ViewPhase::Ready,
            (None, Some(_)) if !self.loading => ViewPhase::Failed,
            _ => ViewPhase::Loading,
        }
    }
}

impl<T: Clone> Loadable<Vec<T>> {
    /// Loaded items, or an empty list before the first success.
    pub fn items(&self) -> Vec<T> {
        self.data.clone().unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.data.as_ref().map_or(true, Vec::is_empty)
    }
}

/// Seconds a success note stays on screen.
pub const SUCCESS_NOTE_SECS: u64 = 4;

/// Pending/error/success feedback for a form submission.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Submission {
    pub pending: bool,
    pub error: Option<ApiError>,
    pub success: Option<String>,
}

impl Submission {
    pub fn start(&mut self) {
        self.pending = true;
        self.error = None;
        self.success = None;
    }

    pub fn succeed(&mut self, message: impl Into<String>) {
        self.pending = false;
        self.success = Some(message.into());
    }

    pub fn fail(&mut self, error: ApiError) {
        self.pending = false;
        if error != ApiError::Cancelled {
            self.error = Some(error);
        }
    }

    /// Inline message for one form field.
    pub fn field(&self, field: &str) -> Option<String> {
        self.error.as_ref().and_then(|e| e.field(field))
    }

    /// Banner text: general messages, or the fallback for network failures.
    /// Purely field-level validation failures have no banner.
    pub fn banner(&self) -> Option<String> {
        match &self.error {
            None => None,
            Some(ApiError::Invalid(errors)) | Some(ApiError::Rejected { errors, .. })
                if errors.general().is_empty() && !errors.is_empty() =>
            {
                None
            }
            Some(e) => Some(e.user_message()),
        }
    }

    /// Clear the success note only while it still reads `message`, so a
    /// timer armed for an older note leaves a newer one alone.
    pub fn expire_success(&mut self, message: &str) {
        if self.success.as_deref() == Some(message) {
            self.success = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FieldErrors;

    #[test]
    fn test_first_load_phases() {
        let mut list: Loadable<Vec<i64>> = Loadable::pending();
        assert_eq!(list.phase(), ViewPhase::Loading);
        list.resolve(Err(ApiError::Network("offline".into())));
        assert_eq!(list.phase(), ViewPhase::Failed);
        assert!(!list.is_loading());

        list.begin();
        assert_eq!(list.phase(), ViewPhase::Loading);
        list.resolve(Ok(vec![1, 2]));
        assert_eq!(list.phase(), ViewPhase::Ready);
        assert_eq!(list.error(), None);
    }

    #[test]
    fn test_failed_refetch_keeps_previous_data() {
        let mut list = Loadable::ready(vec!["a".to_string(), "b".to_string()]);
        list.begin();
        list.resolve(Err(ApiError::Rejected {
            status: 503,
            errors: FieldErrors::general_message("Serviço indisponível."),
        }));
        assert_eq!(list.items(), vec!["a".to_string(), "b".to_string()]);
        assert_eq!(list.error(), Some("Serviço indisponível."));
        assert_eq!(list.phase(), ViewPhase::Ready);

        list.dismiss_error();
        assert_eq!(list.error(), None);
    }

    #[test]
    fn test_cancelled_fetch_is_ignored() {
        let mut list = Loadable::ready(vec![1]);
        list.begin();
        list.resolve(Err(ApiError::Cancelled));
        assert_eq!(list.error(), None);
        assert_eq!(list.items(), vec![1]);
    }

    #[test]
    fn test_patch_only_when_loaded() {
        let mut pending: Loadable<Vec<i64>> = Loadable::pending();
        pending.patch(|v| v.push(1));
        assert!(pending.data().is_none());

        let mut loaded = Loadable::ready(vec![1]);
        loaded.patch(|v| v.push(2));
        assert_eq!(loaded.items(), vec![1, 2]);
    }

    #[test]
    fn test_submission_banner_vs_fields() {
        let mut s = Submission::default();
        s.start();
        s.fail(ApiError::Invalid(FieldErrors::single("orcamento", "Informe um orçamento válido (maior que zero).")));
        assert_eq!(s.banner(), None);
        assert_eq!(
            s.field("orcamento").as_deref(),
            Some("Informe um orçamento válido (maior que zero).")
        );
        assert!(!s.pending);

        s.start();
        assert_eq!(s.error, None);
        s.fail(ApiError::Rejected {
            status: 403,
            errors: FieldErrors::general_message("Apenas clientes podem publicar trabalhos."),
        });
        assert_eq!(s.banner().as_deref(), Some("Apenas clientes podem publicar trabalhos."));

        s.start();
        s.fail(ApiError::Network("offline".into()));
        assert_eq!(s.banner().as_deref(), Some(crate::error::FALLBACK_MESSAGE));
    }

    #[test]
    fn test_expire_success_only_clears_matching_note() {
        let mut s = Submission::default();
        s.start();
        s.succeed("Perfil atualizado");
        s.expire_success("Senha alterada");
        assert_eq!(s.success.as_deref(), Some("Perfil atualizado"));

        s.start();
        s.fail(ApiError::Network("offline".into()));
        s.succeed("Senha alterada");
        s.expire_success("Senha alterada");
        assert_eq!(s.success, None);
        assert_eq!(s.error, Some(ApiError::Network("offline".into())), "error left in place");
    }
}
