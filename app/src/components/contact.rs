//! Contact form with inline validation and a simulated send.

use dioxus::prelude::*;
use folio_core::bootstrap::Section;
use folio_core::contact::{ContactForm, Field, FormMessage, MessageKind, simulate_submission};
use folio_types::SiteConfig;
use gloo_timers::future::TimeoutFuture;

use crate::boot::use_boot_gate;
use crate::reveal;
use crate::utils::prefers_reduced_motion;

#[component]
fn FormField(field: Field, mut form: Signal<ContactForm>) -> Element {
    let state = form.read();
    let status = state.status(field);
    let error = status.error_text();
    let group_class = if state.label_active(field) {
        format!("form-group focused {}", status.class())
    } else {
        format!("form-group {}", status.class())
    };
    let id = field.id();
    let value = state.value(field).to_string();
    let error_id = format!("{id}-error");
    let input_type = if field == Field::Email { "email" } else { "text" };

    rsx! {
        div { class: "{group_class}",
            if field == Field::Message {
                textarea {
                    id: "{id}",
                    name: "{id}",
                    rows: "5",
                    value: "{value}",
                    aria_invalid: "{error.is_some()}",
                    aria_describedby: "{error_id}",
                    oninput: move |e| form.write().set_value(field, e.value()),
                    onblur: move |_| {
                        form.write().validate(field);
                    },
                }
            } else {
                input {
                    id: "{id}",
                    name: "{id}",
                    r#type: input_type,
                    value: "{value}",
                    aria_invalid: "{error.is_some()}",
                    aria_describedby: "{error_id}",
                    oninput: move |e| form.write().set_value(field, e.value()),
                    onblur: move |_| {
                        form.write().validate(field);
                    },
                }
            }
            label { r#for: "{id}", "{field.label()}" }
            span { id: "{error_id}", class: "field-error", role: "alert",
                if let Some(text) = error {
                    "{text}"
                }
            }
        }
    }
}

#[component]
pub fn Contact() -> Element {
    let config = use_context::<SiteConfig>().contact;
    let gate = use_boot_gate();
    let mut form = use_signal(ContactForm::new);
    let mut message = use_signal(|| None::<FormMessage>);
    // Bumped per shown message so a stale hide timer leaves newer ones alone
    let mut message_id = use_signal(|| 0_u32);

    use_effect(move || {
        if !gate.is_ready() {
            return;
        }
        gate.started(Section::Contact);
        if !prefers_reduced_motion() {
            reveal::bind_section(Section::Contact);
        }
    });

    let mut show = move |msg: FormMessage, hide_after_ms: Option<u32>| {
        let id = *message_id.peek() + 1;
        message_id.set(id);
        message.set(Some(msg));
        if let Some(ms) = hide_after_ms {
            spawn(async move {
                TimeoutFuture::new(ms).await;
                if *message_id.peek() == id {
                    message.set(None);
                }
            });
        }
    };

    let onsubmit = move |evt: FormEvent| {
        evt.prevent_default();
        let started = form.write().begin_submit();
        match started {
            None => return,
            Some(Err(invalid)) => {
                show(invalid, None);
                return;
            }
            Some(Ok(())) => message.set(None),
        }

        let config = config.clone();
        spawn(async move {
            TimeoutFuture::new(config.submit_delay_ms).await;
            let outcome = simulate_submission(&mut rand::rng(), config.failure_rate);
            let msg = form.write().finish_submit(outcome);
            let hide = (msg.kind == MessageKind::Success).then_some(config.success_message_ms);
            show(msg, hide);

            TimeoutFuture::new(config.reset_delay_ms).await;
            form.write().reset_button();
        });
    };

    let submit = form.read().submit_state();
    let current = message.read().clone();

    rsx! {
        section { id: "contact", class: "contact",
            div { class: "container",
                h2 { class: "section-title", "Get In Touch" }
                form { class: "contact-form", novalidate: true, onsubmit,
                    for field in Field::ALL {
                        FormField { key: "{field.id()}", field, form }
                    }
                    button {
                        class: "{submit.class()}",
                        r#type: "submit",
                        disabled: submit.disabled(),
                        "{submit.label()}"
                    }
                    if let Some(msg) = current {
                        div { class: "{msg.class()}", role: "status", "{msg.text}" }
                    }
                }
            }
        }
    }
}
