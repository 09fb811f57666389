use gpui::Refineable;
use gpui::{
    ClickEvent, ElementId, Hsla, InteractiveElement, IntoElement, ParentElement, RenderOnce,
    SharedString, StatefulInteractiveElement, Styled, Window, div, px, rgba,
};

use crate::feedback::{NotificationCenter, NotificationPhase, Severity};
use crate::i18n::I18nManager;

/// Renders whatever the notification slot currently holds, or nothing.
#[derive(IntoElement)]
pub struct NotificationBanner {
    id: ElementId,
    center: NotificationCenter,
    pub(super) close_label: SharedString,
    style: gpui::StyleRefinement,
}

impl NotificationBanner {
    /// The close button is labelled with the `notify.close` message.
    pub fn new(center: NotificationCenter, i18n: &I18nManager) -> Self {
        Self {
            id: "arbe-notification".into(),
            center,
            close_label: i18n.t("notify.close"),
            style: gpui::StyleRefinement::default(),
        }
    }

    pub fn with_id(mut self, id: impl Into<ElementId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn close_label(mut self, value: impl Into<SharedString>) -> Self {
        self.close_label = value.into();
        self
    }

    pub(crate) fn background(severity: Severity) -> Hsla {
        match severity {
            Severity::Info => rgba(0x3b82f6e6).into(),
            Severity::Success => rgba(0x22c55ee6).into(),
            Severity::Warning => rgba(0xf59e0be6).into(),
            Severity::Error => rgba(0xef4444e6).into(),
        }
    }
}

impl RenderOnce for NotificationBanner {
    fn render(self, _window: &mut Window, _cx: &mut gpui::App) -> impl IntoElement {
        let Some(entry) = self.center.current() else {
            return div().id(self.id);
        };

        let bg = Self::background(entry.severity);
        let fg: Hsla = gpui::white();
        let opacity = match entry.phase {
            NotificationPhase::Visible => 1.0,
            NotificationPhase::Leaving => 0.0,
        };

        let mut close = None;
        if let (true, Some(id)) = (entry.closable, entry.id) {
            let center = self.center.clone();
            close = Some(
                div()
                    .id("arbe-notification-close")
                    .flex_none()
                    .px_2()
                    .rounded_md()
                    .cursor_pointer()
                    .text_sm()
                    .hover(|style| style.bg(fg.opacity(0.16)))
                    .child(self.close_label)
                    .on_click(move |_: &ClickEvent, window: &mut Window, _cx: &mut gpui::App| {
                        center.dismiss(id);
                        window.refresh();
                    }),
            );
        }

        let mut root = div()
            .id(self.id)
            .absolute()
            .top(px(20.0))
            .right(px(20.0))
            .max_w(px(400.0))
            .p_4()
            .rounded_lg()
            .shadow_lg()
            .bg(bg)
            .text_color(fg)
            .opacity(opacity)
            .flex()
            .flex_row()
            .items_center()
            .gap_3()
            .child(div().flex_none().child(entry.severity.icon()))
            .child(div().flex_1().whitespace_normal().child(entry.message))
            .children(close);
        root.style().refine(&self.style);
        root
    }
}

impl gpui::Styled for NotificationBanner {
    fn style(&mut self) -> &mut gpui::StyleRefinement {
        &mut self.style
    }
}
