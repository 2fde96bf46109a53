use std::{hash::Hash, time::Duration};

use eframe::{App, CreationContext};
use egui::{Align, Color32, Response, RichText, ScrollArea, Ui, Visuals};
use egui_spotlight::{
    render::{EffectsLayer, EguiThemeStore},
    scroll_progress, DeviceCapabilities, EffectsEngine, ElementId, ElementKind, RevealDirection,
    SceneElement, ScrollReveal, SectionId, SettingsEffects, SharedTheme, StaticScene, Theme,
    ThemeToggle,
};
use instant::Instant;

pub mod content;
pub mod portfolio;

use content::{DEGREES, JOBS, PROFILE, PROJECTS, SKILLS};

#[cfg(feature = "events")]
pub const EVENTS_LIMIT: usize = 50;

#[cfg(feature = "events")]
pub use crossbeam::channel::{unbounded, Receiver, Sender};
#[cfg(feature = "events")]
pub use egui_spotlight::events::Event;

const HERO_KEY: &str = "hero";
const REVEAL_STAGGER_MS: u64 = 100;
const SECTION_SPACING: f32 = 96.;

fn element_id(key: impl Hash) -> ElementId {
    egui::Id::new(key).into()
}

fn apply_visuals(ctx: &egui::Context, theme: Theme) {
    ctx.set_visuals(if theme.is_dark() {
        Visuals::dark()
    } else {
        Visuals::light()
    });
}

/// Single page resume with the effects layer on top.
pub struct DemoApp {
    pub capabilities: DeviceCapabilities,
    pub settings: SettingsEffects,
    pub effects: Option<EffectsLayer>,
    pub scene: StaticScene,
    pub reveal: ScrollReveal,
    pub theme: ThemeToggle<EguiThemeStore>,
    pub portfolio_category: &'static str,
    pub progress: f32,
    pub scroll_target: Option<SectionId>,
    #[cfg(feature = "events")]
    pub last_events: Vec<String>,
    #[cfg(feature = "events")]
    pub event_publisher: Sender<Event>,
    #[cfg(feature = "events")]
    pub event_consumer: Receiver<Event>,
}

impl DemoApp {
    pub fn new(cc: &CreationContext<'_>) -> Self {
        Self::with_capabilities(cc, DeviceCapabilities::default())
    }

    pub fn with_capabilities(cc: &CreationContext<'_>, capabilities: DeviceCapabilities) -> Self {
        let theme = ThemeToggle::load(EguiThemeStore::new(&cc.egui_ctx), SharedTheme::default());
        apply_visuals(&cc.egui_ctx, theme.theme());

        #[cfg(feature = "events")]
        let (event_publisher, event_consumer) = unbounded();

        Self {
            capabilities,
            settings: SettingsEffects::default(),
            effects: None,
            scene: StaticScene::new(),
            reveal: ScrollReveal::new(),
            theme,
            portfolio_category: portfolio::ALL,
            progress: 0.,
            scroll_target: None,
            #[cfg(feature = "events")]
            last_events: Vec::new(),
            #[cfg(feature = "events")]
            event_publisher,
            #[cfg(feature = "events")]
            event_consumer,
        }
    }

    pub fn active_section(&self) -> SectionId {
        self.effects
            .as_ref()
            .map_or(SectionId::Home, EffectsLayer::active_section)
    }

    fn scale(&self, id: ElementId) -> f32 {
        self.effects.as_ref().map_or(1., |layer| layer.scale(id))
    }

    fn mount_effects(&self, ctx: &egui::Context) -> EffectsLayer {
        let builder = EffectsEngine::builder()
            .settings(self.settings.clone())
            .capabilities(self.capabilities);

        #[cfg(feature = "events")]
        let builder = builder.event_sink(Box::new(self.event_publisher.clone()));

        EffectsLayer::mount_with(ctx, builder, &self.scene)
    }

    fn update_effects(&mut self, ctx: &egui::Context) {
        if let Some(layer) = &mut self.effects {
            layer.update(ctx, &self.scene);
            return;
        }
        self.effects = Some(self.mount_effects(ctx));
    }

    #[cfg(feature = "events")]
    fn drain_events(&mut self) {
        self.last_events
            .extend(self.event_consumer.try_iter().map(|e| format!("{e:?}")));
        let excess = self.last_events.len().saturating_sub(EVENTS_LIMIT);
        self.last_events.drain(..excess);
    }

    #[cfg(feature = "events")]
    fn ui_events(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("events")
            .resizable(true)
            .default_height(120.)
            .show(ctx, |ui| {
                ui.label(RichText::new("Effect events").strong());
                ScrollArea::vertical().stick_to_bottom(true).show(ui, |ui| {
                    for e in &self.last_events {
                        ui.monospace(e);
                    }
                });
            });
    }

    pub fn ui_nav(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("nav").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new(PROFILE.name).strong());
                ui.separator();

                let active = self.active_section();
                for section in SectionId::ALL {
                    if ui.selectable_label(active == section, section.title()).clicked() {
                        log::debug!("navigate to #{}", section.anchor());
                        self.scroll_target = Some(section);
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(Align::Center), |ui| {
                    let icon = if self.theme.theme().is_dark() { "☀" } else { "🌙" };
                    if ui.button(icon).on_hover_text("Toggle theme").clicked() {
                        let theme = self.theme.toggle();
                        apply_visuals(ui.ctx(), theme);
                    }
                });
            });

            let fill = ui.visuals().selection.bg_fill;
            ui.add(
                egui::ProgressBar::new(self.progress / 100.)
                    .desired_height(2.)
                    .fill(fill),
            );
        });
    }

    pub fn ui_page(&mut self, ui: &mut Ui) {
        let output = ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                self.ui_section(ui, SectionId::Home, Self::ui_home);
                self.ui_section(ui, SectionId::Experience, Self::ui_experience);
                self.ui_section(ui, SectionId::Skills, Self::ui_skills);
                self.ui_section(ui, SectionId::Portfolio, Self::ui_portfolio);
                self.ui_section(ui, SectionId::Contact, Self::ui_contact);
            });

        self.progress = scroll_progress(
            output.state.offset.y,
            output.content_size.y,
            output.inner_rect.height(),
        );
    }

    fn ui_section(
        &mut self,
        ui: &mut Ui,
        section: SectionId,
        add: impl FnOnce(&mut Self, &mut Ui),
    ) {
        let rect = ui
            .scope(|ui| {
                ui.add_space(SECTION_SPACING / 2.);
                add(self, ui);
                ui.add_space(SECTION_SPACING / 2.);
            })
            .response
            .rect;
        self.scene.set_section(section, rect);

        if self.scroll_target == Some(section) {
            ui.scroll_to_rect(rect, Some(Align::TOP));
            self.scroll_target = None;
        }
    }

    fn ui_heading(ui: &mut Ui, section: SectionId) {
        ui.label(RichText::new(section.title()).size(28.).strong());
        ui.add_space(16.);
    }

    fn hero_text(
        &mut self,
        ui: &mut Ui,
        key: &str,
        kind: ElementKind,
        text: &str,
        size: f32,
    ) -> Response {
        let id = element_id(key);
        let response = ui.label(RichText::new(text).size(size * self.scale(id)));
        self.scene
            .push_hero_element(SceneElement::new(id, kind, response.rect));
        response
    }

    fn hero_link(&mut self, ui: &mut Ui, key: &str, text: &str, href: &str) {
        let id = element_id(key);
        let response = ui.hyperlink_to(RichText::new(text).size(14. * self.scale(id)), href);
        self.scene.push_hero_element(
            SceneElement::new(id, ElementKind::Span, response.rect).with_link(href),
        );
    }

    fn ui_home(&mut self, ui: &mut Ui) {
        let rect = ui
            .scope(|ui| {
                ui.add_space(64.);
                self.hero_text(ui, "hero_greeting", ElementKind::Span, "Hi, I'm", 18.);
                self.hero_text(ui, "hero_name", ElementKind::Heading(1), PROFILE.name, 56.);
                self.hero_text(ui, "hero_role", ElementKind::Heading(2), PROFILE.role, 26.);
                ui.add_space(12.);
                self.hero_text(ui, "hero_bio", ElementKind::Paragraph, PROFILE.bio, 16.);
                ui.add_space(12.);

                ui.horizontal(|ui| {
                    self.hero_text(ui, "hero_location", ElementKind::Span, PROFILE.location, 14.);
                    self.hero_link(ui, "hero_github", "GitHub", PROFILE.github);
                    self.hero_link(ui, "hero_linkedin", "LinkedIn", PROFILE.linkedin);
                });
                ui.add_space(16.);

                let contact = ui.button(RichText::new("Get in touch").size(16.));
                self.scene.push_hero_element(
                    SceneElement::new(element_id("hero_contact"), ElementKind::Span, contact.rect)
                        .inside_button(),
                );
                if contact.clicked() {
                    self.scroll_target = Some(SectionId::Contact);
                }
                ui.add_space(64.);
            })
            .response
            .rect;

        self.scene.set_hero(element_id(HERO_KEY), rect);
    }

    /// Draws `add` faded in once it scrolled into view.
    fn revealed(
        &mut self,
        ui: &mut Ui,
        key: impl Hash,
        direction: RevealDirection,
        order: u64,
        add: impl FnOnce(&mut Ui),
    ) {
        let id = element_id(key);
        let now = Instant::now();
        self.reveal
            .register(id, direction, Duration::from_millis(order * REVEAL_STAGGER_MS));

        let frame = self.reveal.frame(id, now);
        let rect = ui
            .scope(|ui| {
                ui.set_opacity(frame.opacity);
                add(ui);
            })
            .response
            .rect;

        self.reveal.observe(id, rect, ui.clip_rect(), now);
        if self.reveal.is_animating(now) {
            ui.ctx().request_repaint();
        }
    }

    fn ui_experience(&mut self, ui: &mut Ui) {
        Self::ui_heading(ui, SectionId::Experience);

        for (i, job) in JOBS.iter().enumerate() {
            let direction = if i % 2 == 0 {
                RevealDirection::Left
            } else {
                RevealDirection::Right
            };
            self.revealed(ui, ("job", i), direction, i as u64, |ui| {
                ui.group(|ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new(job.title).size(18.).strong());
                    ui.label(format!("{} · {}", job.company, job.period));
                    for h in job.highlights {
                        ui.label(format!("• {h}"));
                    }
                });
            });
            ui.add_space(8.);
        }

        ui.add_space(24.);
        ui.label(RichText::new("Education").size(22.).strong());
        for (i, degree) in DEGREES.iter().enumerate() {
            self.revealed(ui, ("degree", i), RevealDirection::Up, i as u64, |ui| {
                ui.label(RichText::new(degree.title).strong());
                ui.label(format!("{} · {}", degree.school, degree.period));
            });
        }
    }

    fn ui_skills(&mut self, ui: &mut Ui) {
        Self::ui_heading(ui, SectionId::Skills);

        for (i, group) in SKILLS.iter().enumerate() {
            self.revealed(ui, ("skills", i), RevealDirection::Up, i as u64, |ui| {
                ui.label(RichText::new(group.name).size(18.).strong());
                let bg = ui.visuals().faint_bg_color;
                ui.horizontal_wrapped(|ui| {
                    for skill in group.skills {
                        ui.label(RichText::new(*skill).background_color(bg));
                    }
                });
            });
            ui.add_space(8.);
        }
    }

    fn ui_portfolio(&mut self, ui: &mut Ui) {
        Self::ui_heading(ui, SectionId::Portfolio);

        ui.horizontal(|ui| {
            for category in portfolio::categories(PROJECTS) {
                if ui
                    .selectable_label(self.portfolio_category == category, category)
                    .clicked()
                {
                    self.portfolio_category = category;
                }
            }
        });
        ui.add_space(12.);

        for (i, project) in portfolio::filter(PROJECTS, self.portfolio_category)
            .into_iter()
            .enumerate()
        {
            self.revealed(ui, ("project", project.title), RevealDirection::Up, i as u64, |ui| {
                ui.group(|ui| {
                    ui.set_width(ui.available_width());
                    ui.label(RichText::new(project.title).size(18.).strong());
                    ui.label(project.description);
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(project.category).color(Color32::GRAY));
                        for tag in project.tags {
                            ui.label(RichText::new(format!("#{tag}")).small());
                        }
                    });
                });
            });
            ui.add_space(8.);
        }
    }

    fn ui_contact(&mut self, ui: &mut Ui) {
        Self::ui_heading(ui, SectionId::Contact);

        self.revealed(ui, "contact", RevealDirection::Down, 0, |ui| {
            ui.label("Open to new projects. The fastest way to reach me is email.");
            ui.add_space(8.);
            ui.hyperlink_to(PROFILE.email, format!("mailto:{}", PROFILE.email));
            ui.hyperlink_to("GitHub", PROFILE.github);
            ui.hyperlink_to("LinkedIn", PROFILE.linkedin);
        });
    }
}

impl App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // geometry is collected again while the page is laid out
        self.scene.clear();

        #[cfg(feature = "events")]
        {
            self.drain_events();
            self.ui_events(ctx);
        }

        self.ui_nav(ctx);
        egui::CentralPanel::default().show(ctx, |ui| self.ui_page(ui));

        self.update_effects(ctx);
    }
}
