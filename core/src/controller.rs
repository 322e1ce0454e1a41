// Session/result controller: one user action at a time

use std::sync::Arc;

use async_trait::async_trait;

use crate::composer::{compose, ComposedRequest};
use crate::credentials::CredentialProvider;
use crate::errors::{CredentialError, GenerationError};
use crate::intake::ImageSlots;
use crate::validation::ValidationError;
use crate::models::{
    AspectRatio, FormatPreset, GeneratedImage, GenerationBrief, GenerationId, GenerationOutcome,
    QualityTier,
};

/// Something that can turn a composed request into an image.
/// Implemented by the Gemini adapter; a single attempt, never retried.
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    async fn generate(&self, request: ComposedRequest, credential: &str) -> GenerationOutcome;
}

/// Controller state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Submitting(GenerationId),
    Succeeded(GeneratedImage),
    Failed(GenerationError),
}

/// Current form contents
#[derive(Debug, Clone, Default)]
pub struct DesignForm {
    pub images: ImageSlots,
    pub description: String,
    pub aspect_ratio: AspectRatio,
    pub quality: QualityTier,
}

impl DesignForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_preset(&mut self, preset: &FormatPreset) {
        self.aspect_ratio = preset.aspect_ratio;
    }

    /// Check the images and brief a submission would send
    pub fn validate(&self) -> Result<(), ValidationError> {
        let product = self
            .images
            .product()
            .ok_or(ValidationError::MissingProductImage)?;
        product.validate()?;
        if let Some(logo) = self.images.logo() {
            logo.validate()?;
        }
        self.brief().validate()
    }

    /// Product image present, images readable and description within limits
    pub fn is_ready(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn brief(&self) -> GenerationBrief {
        GenerationBrief::new(self.description.clone(), self.aspect_ratio, self.quality)
    }
}

/// Why a submission did not start
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SubmitRejection {
    #[error("a product image and a description are required")]
    NotReady,

    #[error("a generation is already in progress")]
    AlreadySubmitting,

    #[error("API Key not found. Please reconnect your account.")]
    CredentialMissing,
}

/// A started attempt, to be handed to an `ImageGenerator`
#[derive(Debug, Clone)]
pub struct Dispatch {
    pub id: GenerationId,
    pub request: ComposedRequest,
    pub credential: String,
}

/// Holds the outcome slot and authentication flag for one user session
pub struct SessionController {
    credentials: Arc<dyn CredentialProvider>,
    state: SessionState,
    authenticated: bool,
}

impl SessionController {
    pub fn new(credentials: Arc<dyn CredentialProvider>) -> Self {
        let authenticated = credentials.credential().is_some();
        Self {
            credentials,
            state: SessionState::Idle,
            authenticated,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self.state, SessionState::Submitting(_))
    }

    /// Cached authentication flag; false sends the host back to credential selection
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn image(&self) -> Option<&GeneratedImage> {
        match &self.state {
            SessionState::Succeeded(image) => Some(image),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&GenerationError> {
        match &self.state {
            SessionState::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Refresh the authentication flag from the credential capability
    pub async fn check_authentication(&mut self) -> bool {
        self.authenticated = self.credentials.has_credential().await;
        self.authenticated
    }

    /// Run the host's selection flow
    pub async fn select_credential(&mut self) -> Result<(), CredentialError> {
        self.credentials.select_credential().await?;
        self.authenticated = true;
        Ok(())
    }

    /// Start an attempt: `Idle|Succeeded|Failed -> Submitting`.
    ///
    /// An incomplete form or an attempt already in flight leaves the state
    /// untouched. A missing credential fails the attempt before dispatch.
    pub fn begin(&mut self, form: &DesignForm) -> Result<Dispatch, SubmitRejection> {
        if self.is_submitting() {
            return Err(SubmitRejection::AlreadySubmitting);
        }

        if let Err(e) = form.validate() {
            tracing::debug!("form not ready: {}", e);
            return Err(SubmitRejection::NotReady);
        }
        let Some(product) = form.images.product() else {
            return Err(SubmitRejection::NotReady);
        };

        let Some(credential) = self.credentials.credential() else {
            tracing::warn!("generation requested without a credential");
            self.authenticated = false;
            self.state = SessionState::Failed(GenerationError::CredentialMissing);
            return Err(SubmitRejection::CredentialMissing);
        };

        let request = compose(&form.brief(), product, form.images.logo());
        let id = GenerationId::new();
        tracing::info!(
            generation_id = %id,
            model = %request.model,
            aspect_ratio = %request.image_config.aspect_ratio,
            with_logo = form.images.logo().is_some(),
            "generation started"
        );

        self.state = SessionState::Submitting(id);
        Ok(Dispatch {
            id,
            request,
            credential,
        })
    }

    /// Record the outcome of attempt `id`: `Submitting -> Succeeded|Failed`.
    /// Outcomes for any other attempt are ignored.
    pub fn finish(&mut self, id: GenerationId, outcome: GenerationOutcome) -> &SessionState {
        match self.state {
            SessionState::Submitting(current) if current == id => {}
            _ => {
                tracing::warn!(generation_id = %id, "ignoring outcome of an attempt that is not in flight");
                return &self.state;
            }
        }

        self.state = match outcome {
            Ok(image) => {
                tracing::info!(generation_id = %id, "generation succeeded");
                SessionState::Succeeded(image)
            }
            Err(error) => {
                tracing::error!(generation_id = %id, error = %error, "generation failed");
                if error.requires_reauthentication() {
                    self.authenticated = false;
                    self.credentials.invalidate();
                }
                SessionState::Failed(error)
            }
        };
        &self.state
    }

    /// Begin, invoke the generator once, and record the outcome
    pub async fn generate<G>(
        &mut self,
        form: &DesignForm,
        generator: &G,
    ) -> Result<&SessionState, SubmitRejection>
    where
        G: ImageGenerator + ?Sized,
    {
        let dispatch = self.begin(form)?;
        let outcome = generator
            .generate(dispatch.request, &dispatch.credential)
            .await;
        Ok(self.finish(dispatch.id, outcome))
    }

    /// "New design": clear the result. An attempt in flight is not cancelled.
    pub fn reset(&mut self) -> &SessionState {
        if !self.is_submitting() {
            self.state = SessionState::Idle;
        }
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::credentials::StaticCredentialProvider;
    use crate::intake::EncodedImage;

    fn ready_form() -> DesignForm {
        let mut form = DesignForm::new();
        form.images
            .set_product(EncodedImage::new("iVBORw0KGgo=", "image/png"));
        form.description = "golden hour beach shot".to_string();
        form
    }

    fn controller() -> SessionController {
        SessionController::new(Arc::new(StaticCredentialProvider::new("key")))
    }

    #[test]
    fn test_begin_moves_to_submitting() {
        let mut controller = controller();
        let dispatch = controller.begin(&ready_form()).unwrap();

        assert_eq!(controller.state(), &SessionState::Submitting(dispatch.id));
        assert_eq!(dispatch.credential, "key");
        assert_eq!(dispatch.request.segments.len(), 3);
    }

    #[test]
    fn test_second_begin_is_rejected_while_in_flight() {
        let mut controller = controller();
        let first = controller.begin(&ready_form()).unwrap();

        assert_eq!(
            controller.begin(&ready_form()).unwrap_err(),
            SubmitRejection::AlreadySubmitting
        );
        assert_eq!(controller.state(), &SessionState::Submitting(first.id));
    }

    #[test]
    fn test_stale_outcome_is_ignored() {
        let mut controller = controller();
        let dispatch = controller.begin(&ready_form()).unwrap();

        controller.finish(GenerationId::new(), Err(GenerationError::NoImageProduced));
        assert_eq!(controller.state(), &SessionState::Submitting(dispatch.id));
    }

    #[test]
    fn test_reset_does_not_cancel_in_flight_attempt() {
        let mut controller = controller();
        let dispatch = controller.begin(&ready_form()).unwrap();

        controller.reset();
        assert_eq!(controller.state(), &SessionState::Submitting(dispatch.id));
    }

    #[test]
    fn test_form_validation_reasons() {
        let mut form = ready_form();
        assert!(form.validate().is_ok());

        form.description = "x".repeat(4_001);
        assert!(matches!(
            form.validate(),
            Err(ValidationError::DescriptionTooLarge(4_001, 4_000))
        ));

        let mut form = ready_form();
        form.images.set_logo(EncodedImage::new("R0lGODlh", "image/gif"));
        assert!(matches!(
            form.validate(),
            Err(ValidationError::UnsupportedMimeType(_))
        ));

        form.images.clear_logo();
        form.images.clear_product();
        assert!(matches!(
            form.validate(),
            Err(ValidationError::MissingProductImage)
        ));
    }

    #[test]
    fn test_invalid_form_keeps_idle() {
        let mut controller = controller();
        let mut form = ready_form();
        form.images
            .set_product(EncodedImage::new("not base64!!", "image/png"));

        assert_eq!(controller.begin(&form).unwrap_err(), SubmitRejection::NotReady);
        assert_eq!(controller.state(), &SessionState::Idle);
    }

    #[test]
    fn test_preset_sets_aspect_ratio() {
        let mut form = DesignForm::new();
        form.apply_preset(FormatPreset::find("fb-post").unwrap());
        assert_eq!(form.aspect_ratio, AspectRatio::Landscape);
    }
}
