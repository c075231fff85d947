use leptos::html;
use leptos::prelude::*;

/// Groups a label with its input
#[component]
pub fn FormControl(children: Children) -> impl IntoView {
    view! { <div class="form-control">{children()}</div> }
}

/// Label for the input with id `for_id`
#[component]
pub fn FormLabel(
    /// Id of the labelled input
    for_id: &'static str,
    children: Children,
) -> impl IntoView {
    view! {
        <label for=for_id class="form-label">
            {children()}
        </label>
    }
}

/// Uncontrolled text input
///
/// The value is read through `node_ref` when needed. `required` maps to the
/// native attribute, so the browser refuses to submit the form while the
/// field is empty.
#[component]
pub fn Input(
    /// Form field name, also used as the element id
    name: &'static str,
    /// Input type (text, password, email, etc.)
    #[prop(default = "text")]
    input_type: &'static str,
    #[prop(default = false)]
    required: bool,
    /// Browser autofill hint
    #[prop(optional)]
    autocomplete: Option<&'static str>,
    /// Handle on the rendered element
    node_ref: NodeRef<html::Input>,
) -> impl IntoView {
    view! {
        <input
            node_ref=node_ref
            type=input_type
            id=name
            name=name
            class="input"
            required=required
            autocomplete=autocomplete
        />
    }
}
