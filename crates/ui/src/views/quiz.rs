use dioxus::prelude::*;
use services::{AlertAction, QuizHandle};
use tracing::error;

use crate::context::{AppContext, QuizSession};
use crate::vm::{AlertVm, QuizVm};

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut vm = use_signal(QuizVm::default);

    // One controller per mounted view; both tasks end with the component scope.
    let handle = use_hook(move || match ctx.start_quiz() {
        Ok(QuizSession {
            controller,
            handle,
            mut commands,
        }) => {
            spawn(controller.run());
            spawn(async move {
                while let Some(command) = commands.recv().await {
                    vm.write().apply(command);
                }
            });
            Some(handle)
        }
        Err(err) => {
            error!(error = %err, "failed to start quiz");
            None
        }
    });

    let Some(handle) = handle else {
        return rsx! {
            div { class: "page",
                p { "The quiz could not be started." }
            }
        };
    };

    let snapshot = vm.read().clone();
    let enabled = snapshot.buttons_enabled();
    let poster_class = snapshot.poster_class();

    let answer = {
        let handle = handle.clone();
        move |value: bool| handle.answer(value)
    };
    let answer_yes = answer.clone();
    let answer_no = answer;

    rsx! {
        div { class: "page quiz-page",
            match snapshot.question {
                Some(question) => rsx! {
                    div { class: "quiz-header",
                        span { class: "quiz-header__label", "Question:" }
                        span { class: "quiz-header__counter", "{question.counter}" }
                    }
                    div { class: "{poster_class}",
                        if let Some(src) = question.image_src {
                            img { src: "{src}", alt: "Movie poster" }
                        }
                        if snapshot.loading {
                            div { class: "quiz-spinner", "Loading..." }
                        }
                    }
                    p { class: "quiz-question", "{question.text}" }
                },
                None => rsx! {
                    div { class: "quiz-poster quiz-poster--empty",
                        if snapshot.loading {
                            div { class: "quiz-spinner", "Loading..." }
                        }
                    }
                },
            }

            div { class: "quiz-actions",
                button {
                    class: "btn quiz-answer",
                    id: "quiz-no",
                    disabled: !enabled,
                    onclick: move |_| answer_no(false),
                    "No"
                }
                button {
                    class: "btn quiz-answer",
                    id: "quiz-yes",
                    disabled: !enabled,
                    onclick: move |_| answer_yes(true),
                    "Yes"
                }
            }

            if let Some(alert) = snapshot.alert {
                QuizAlert { alert, vm, handle: handle.clone() }
            }
        }
    }
}

#[component]
fn QuizAlert(alert: AlertVm, vm: Signal<QuizVm>, handle: QuizHandle) -> Element {
    let mut vm = vm;

    rsx! {
        div { class: "quiz-overlay",
            div {
                class: "quiz-alert",
                role: "alertdialog",
                h3 { class: "quiz-alert__title", "{alert.title}" }
                pre { class: "quiz-alert__message", "{alert.message}" }
                button {
                    class: "btn quiz-alert__button",
                    onclick: move |_| match vm.write().dismiss_alert() {
                        Some(AlertAction::Restart) => handle.restart(),
                        Some(AlertAction::Retry) => handle.retry(),
                        None => {}
                    },
                    "{alert.button_text}"
                }
            }
        }
    }
}
