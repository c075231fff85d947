use leptos::prelude::*;

/// What the button does inside a form
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum ButtonType {
    Submit,
    Button,
}

impl ButtonType {
    fn as_str(&self) -> &'static str {
        match self {
            ButtonType::Submit => "submit",
            ButtonType::Button => "button",
        }
    }
}

/// Primary action button
#[component]
pub fn Button(
    /// `submit` buttons trigger the enclosing form
    #[prop(default = ButtonType::Button)]
    button_type: ButtonType,
    /// Whether button is disabled
    #[prop(into, optional)]
    disabled: Signal<bool>,
    /// Whether button is in loading state
    #[prop(into, optional)]
    loading: Signal<bool>,
    /// Button content (text or elements)
    children: Children,
) -> impl IntoView {
    view! {
        <button
            type=button_type.as_str()
            class="btn-base btn-primary"
            disabled=move || disabled.get() || loading.get()
            aria-busy=move || loading.get().to_string()
        >
            {move || loading.get().then(|| view! { <span class="btn-spinner" aria-hidden="true"></span> })}
            {children()}
        </button>
    }
}
