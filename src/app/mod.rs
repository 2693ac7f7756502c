use eframe::egui::{self, Align, Context, Layout};
use tracing::{info, warn};

use crate::layout::LayoutConfig;
use crate::pathway::PathwayGraph;
use crate::scene::{PathwayRole, PathwayScene, SelectionChange, SelectionHook};

mod list;
mod render_utils;
mod view;

pub use list::PathwayList;

pub struct PathwayViewerApp {
    library: Vec<PathwayGraph>,
    scene: PathwayScene<PathwayList>,
    status: Option<String>,
}

impl PathwayViewerApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        library: Vec<PathwayGraph>,
        layout: LayoutConfig,
    ) -> Self {
        let ctx = cc.egui_ctx.clone();
        let hook: SelectionHook = Box::new(move |change: &SelectionChange| {
            info!(previous = ?change.previous, current = ?change.current, "selection changed");
            ctx.request_repaint();
        });

        let list = PathwayList::new(&library);
        let mut app = Self {
            scene: PathwayScene::new(list, layout, Some(hook)),
            library,
            status: None,
        };

        if !app.library.is_empty() {
            app.add_pathway(0);
        }
        app
    }

    fn add_pathway(&mut self, index: usize) {
        let Some(pathway) = self.library.get(index) else {
            return;
        };

        match self.scene.add_pathway(pathway) {
            Ok(role) => {
                let outcome = self.scene.run_layout();
                let role = match role {
                    PathwayRole::Focus => "focus",
                    PathwayRole::Context => "context",
                };
                self.status = Some(if outcome.converged {
                    format!("added {} as {role}", pathway.title())
                } else {
                    format!(
                        "added {} as {role}; layout stopped after {} iterations",
                        pathway.title(),
                        outcome.iterations
                    )
                });
            }
            Err(error) => {
                warn!(%error, pathway = pathway.id(), "pathway not added");
                self.status = Some(error.to_string());
            }
        }
    }

    fn draw_pathway_list(&self, ui: &mut egui::Ui) -> Option<usize> {
        let mut picked = None;

        ui.heading("Pathways");
        if let Some(vertex) = self.scene.list().filter() {
            ui.label(format!("containing {vertex}"));
        }
        ui.separator();

        egui::ScrollArea::vertical().show(ui, |ui| {
            for (index, entry) in self.scene.list().visible() {
                if ui.selectable_label(false, &entry.title).clicked() {
                    picked = Some(index);
                }
            }
        });

        picked
    }
}

impl eframe::App for PathwayViewerApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut picked_pathway = None;
        let mut reset_requested = false;
        let mut relayout_requested = false;

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("dynamic pathway");
                    ui.separator();
                    ui.label(format!("nodes: {}", self.scene.nodes().len()));
                    ui.label(format!("edges: {}", self.scene.edges().len()));
                    if let Some(vertex) = self.scene.selected_vertex()
                        && let Ok(node) = self.scene.node_for(vertex)
                    {
                        ui.label(format!("selected: {}", node.label()));
                    }
                    if let Some(outcome) = self.scene.last_layout() {
                        ui.label(format!(
                            "layout: {} iterations{}",
                            outcome.iterations,
                            if outcome.converged { "" } else { " (unsettled)" }
                        ));
                    }
                    if ui.button("Re-run layout").clicked() {
                        relayout_requested = true;
                    }
                    if ui.button("Reset").clicked() {
                        reset_requested = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(status) = &self.status {
                            ui.label(status.as_str());
                        }
                    });
                });
            });

        egui::SidePanel::left("pathways")
            .resizable(true)
            .default_width(280.0)
            .show(ctx, |ui| picked_pathway = self.draw_pathway_list(ui));

        let clicked_vertex = egui::CentralPanel::default()
            .show(ctx, |ui| view::draw_scene(ui, &self.scene))
            .inner;

        if let Some(vertex) = clicked_vertex
            && let Err(error) = self.scene.select(&vertex)
        {
            warn!(%error, "selection ignored");
        }

        if ctx.input(|input| input.key_pressed(egui::Key::Escape)) {
            self.scene.clear_selection();
        }

        if reset_requested {
            self.scene.reset();
            self.status = None;
        } else if relayout_requested {
            self.scene.run_layout();
        }

        if let Some(index) = picked_pathway {
            self.add_pathway(index);
        }
    }
}
