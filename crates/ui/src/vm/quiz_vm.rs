use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use services::{AlertAction, AlertModel, PresentationCommand, QuizStep};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Wrong,
}

impl Feedback {
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Feedback::Correct => "quiz-poster quiz-poster--correct",
            Feedback::Wrong => "quiz-poster quiz-poster--wrong",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    /// Poster as a `data:` URL; `None` when the question has no image.
    pub image_src: Option<String>,
    pub text: String,
    pub counter: String,
}

impl From<QuizStep> for QuestionVm {
    fn from(step: QuizStep) -> Self {
        Self {
            image_src: image_data_url(&step.image),
            text: step.question,
            counter: step.question_number,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlertVm {
    pub title: String,
    pub message: String,
    pub button_text: String,
    pub action: AlertAction,
}

impl From<AlertModel> for AlertVm {
    fn from(alert: AlertModel) -> Self {
        Self {
            title: alert.title,
            message: alert.message,
            button_text: alert.button_text,
            action: alert.action,
        }
    }
}

/// Everything the quiz screen renders, rebuilt only from presentation commands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuizVm {
    pub loading: bool,
    pub input_enabled: bool,
    pub question: Option<QuestionVm>,
    pub feedback: Option<Feedback>,
    pub alert: Option<AlertVm>,
}

impl QuizVm {
    pub fn apply(&mut self, command: PresentationCommand) {
        match command {
            PresentationCommand::SetLoading(loading) => self.loading = loading,
            PresentationCommand::ShowQuestion(step) => {
                self.question = Some(step.into());
                self.alert = None;
            }
            PresentationCommand::ShowFeedback { is_correct } => {
                self.feedback = Some(if is_correct {
                    Feedback::Correct
                } else {
                    Feedback::Wrong
                });
            }
            PresentationCommand::ClearFeedback => self.feedback = None,
            PresentationCommand::SetInputEnabled(enabled) => self.input_enabled = enabled,
            PresentationCommand::ShowRoundResult { alert, .. } | PresentationCommand::ShowError(alert) => {
                self.alert = Some(alert.into());
            }
        }
    }

    /// Close the alert and return what its button asked for.
    pub fn dismiss_alert(&mut self) -> Option<AlertAction> {
        self.alert.take().map(|alert| alert.action)
    }

    #[must_use]
    pub fn poster_class(&self) -> &'static str {
        self.feedback.map_or("quiz-poster", Feedback::css_class)
    }

    #[must_use]
    pub fn buttons_enabled(&self) -> bool {
        self.input_enabled && self.alert.is_none()
    }
}

fn image_data_url(bytes: &[u8]) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }
    let mime = if bytes.starts_with(b"\x89PNG") {
        "image/png"
    } else {
        "image/jpeg"
    };
    Some(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(counter: &str) -> QuizStep {
        QuizStep {
            image: vec![0xFF, 0xD8, 0xFF],
            question: "Is this movie rated higher than 7?".into(),
            question_number: counter.into(),
        }
    }

    #[test]
    fn question_enables_buttons_after_loading() {
        let mut vm = QuizVm::default();
        vm.apply(PresentationCommand::SetLoading(true));
        assert!(vm.loading);

        vm.apply(PresentationCommand::SetLoading(false));
        vm.apply(PresentationCommand::ShowQuestion(step("1/10")));
        vm.apply(PresentationCommand::SetInputEnabled(true));

        let question = vm.question.clone().unwrap();
        assert_eq!(question.counter, "1/10");
        assert_eq!(question.image_src.as_deref(), Some("data:image/jpeg;base64,/9j/"));
        assert!(!vm.loading);
        assert!(vm.buttons_enabled());
    }

    #[test]
    fn feedback_sets_and_clears_poster_class() {
        let mut vm = QuizVm::default();

        vm.apply(PresentationCommand::ShowFeedback { is_correct: false });
        assert_eq!(vm.poster_class(), "quiz-poster quiz-poster--wrong");

        vm.apply(PresentationCommand::ClearFeedback);
        assert_eq!(vm.poster_class(), "quiz-poster");
    }

    #[test]
    fn alert_blocks_buttons_until_dismissed() {
        let mut vm = QuizVm::default();
        vm.apply(PresentationCommand::SetInputEnabled(true));
        vm.apply(PresentationCommand::ShowError(AlertModel::load_error("offline")));

        assert!(!vm.buttons_enabled());
        assert_eq!(vm.dismiss_alert(), Some(AlertAction::Retry));
        assert_eq!(vm.dismiss_alert(), None);
        assert!(vm.buttons_enabled());
    }

    #[test]
    fn empty_image_has_no_source() {
        let mut vm = QuizVm::default();
        let mut empty = step("3/10");
        empty.image.clear();

        vm.apply(PresentationCommand::ShowQuestion(empty));

        assert_eq!(vm.question.unwrap().image_src, None);
    }
}
