use std::rc::Rc;

use gpui::Refineable;
use gpui::{
    ClickEvent, ElementId, InteractiveElement, IntoElement, ParentElement, RenderOnce,
    StatefulInteractiveElement, Styled, Window, div, rgb,
};

use crate::workflow::SubmitControl;

type SubmitHandler = Rc<dyn Fn(&ClickEvent, &mut Window, &mut gpui::App)>;

/// Button bound to a [`SubmitControl`]: shows its label and ignores clicks
/// while a submission is in flight.
#[derive(IntoElement)]
pub struct SubmitButton {
    id: ElementId,
    control: SubmitControl,
    on_submit: Option<SubmitHandler>,
    style: gpui::StyleRefinement,
}

impl SubmitButton {
    pub fn new(control: SubmitControl) -> Self {
        Self {
            id: "arbe-submit".into(),
            control,
            on_submit: None,
            style: gpui::StyleRefinement::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<ElementId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn on_submit(
        mut self,
        handler: impl Fn(&ClickEvent, &mut Window, &mut gpui::App) + 'static,
    ) -> Self {
        self.on_submit = Some(Rc::new(handler));
        self
    }
}

impl RenderOnce for SubmitButton {
    fn render(self, _window: &mut Window, _cx: &mut gpui::App) -> impl IntoElement {
        let disabled = self.control.is_disabled();
        let mut root = div()
            .id(self.id)
            .w_full()
            .py_3()
            .px_4()
            .rounded_md()
            .flex()
            .items_center()
            .justify_center()
            .bg(rgb(0x1f2937))
            .text_color(gpui::white())
            .font_weight(gpui::FontWeight::SEMIBOLD)
            .child(self.control.label());

        if disabled {
            root = root.opacity(0.6).cursor_not_allowed();
        } else {
            root = root
                .cursor_pointer()
                .hover(|style| style.bg(rgb(0x374151)));
            if let Some(handler) = self.on_submit {
                let control = self.control.clone();
                root = root.on_click(move |event, window, cx| {
                    // A click can land between the render and the guard being taken.
                    if control.is_disabled() {
                        return;
                    }
                    (handler)(event, window, cx);
                    window.refresh();
                });
            }
        }

        root.style().refine(&self.style);
        root
    }
}

impl gpui::Styled for SubmitButton {
    fn style(&mut self) -> &mut gpui::StyleRefinement {
        &mut self.style
    }
}
