//! Desktop window: search form, keyword rules, results table and export.
//!
//! Network work runs on a worker thread with its own current-thread
//! runtime and reports back over a channel, so the UI thread only ever
//! owns the state it draws.

use anyhow::{anyhow, Result};
use eframe::egui;
use egui_extras::{Column, TableBuilder};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::future::Future;
use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use super::Presenter;
use crate::config::{Config, Delimiter};
use crate::error::ScrapeError;
use crate::export::{resolve_out_path, save_delimited, save_html, save_json};
use crate::filters::{FieldScope, FilterRules, KeywordList, KeywordRule};
use crate::models::{Listing, SearchQuery, WorkLocation};
use crate::pipeline::{run_search_cancellable, SearchOutcome};
use crate::results::ResultSet;
use crate::scrapers::{CancelFlag, JobSource, LinkedinScraper};
use crate::utils::http::create_client;

const WINDOW_TITLE: &str = "LinkedIn Job Scraper";

/// Opens the window once `present` is called, preloaded with the outcome
pub struct WindowPresenter {
    config: Arc<Config>,
    query: SearchQuery,
    rules: FilterRules,
    messages: Vec<String>,
}

impl WindowPresenter {
    pub fn new(config: Arc<Config>, query: SearchQuery, rules: FilterRules) -> Self {
        Self {
            config,
            query,
            rules,
            messages: Vec::new(),
        }
    }

    /// Open the window with an empty table; searching happens from the form
    pub fn launch(self) -> Result<()> {
        let app = JobApp::new(self.config, &self.query, &self.rules, None, self.messages);
        run_window(app)
    }
}

impl Presenter for WindowPresenter {
    fn notify(&mut self, message: &str) -> Result<()> {
        self.messages.push(message.to_string());
        Ok(())
    }

    fn warn(&mut self, message: &str) -> Result<()> {
        self.messages.push(format!("warning: {}", message));
        Ok(())
    }

    fn present(&mut self, outcome: &SearchOutcome) -> Result<()> {
        let app = JobApp::new(
            self.config.clone(),
            &outcome.query,
            &self.rules,
            Some(outcome.clone()),
            std::mem::take(&mut self.messages),
        );
        run_window(app)
    }
}

fn run_window(app: JobApp) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([960.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(WINDOW_TITLE, options, Box::new(|_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow!("Window failed: {}", e))
}

/// Run `job` against a fresh scraper on a current-thread runtime
fn with_source<T, F, Fut>(config: Arc<Config>, cancel: CancelFlag, job: F) -> Result<T>
where
    F: FnOnce(LinkedinScraper) -> Fut,
    Fut: Future<Output = Result<T, ScrapeError>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build()?;
    let client = create_client(&config.http)?;
    let scraper = LinkedinScraper::new(config, client).with_cancel(cancel);
    Ok(runtime.block_on(job(scraper))?)
}

enum WorkerMessage {
    Tested(Result<(), String>),
    Counted(Result<Option<usize>, String>),
    Searched(Result<SearchOutcome, String>),
}

/// Actions that would throw away unsaved results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Guarded {
    Fetch,
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortColumn {
    Title,
    Company,
    Location,
    Date,
    Description,
}

impl SortColumn {
    const ALL: [SortColumn; 5] = [
        SortColumn::Title,
        SortColumn::Company,
        SortColumn::Location,
        SortColumn::Date,
        SortColumn::Description,
    ];

    fn label(&self) -> &'static str {
        match self {
            SortColumn::Title => "Title",
            SortColumn::Company => "Company",
            SortColumn::Location => "Location",
            SortColumn::Date => "Date",
            SortColumn::Description => "Description",
        }
    }

    fn compare(&self, a: &Listing, b: &Listing) -> Ordering {
        match self {
            SortColumn::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortColumn::Company => a.company.to_lowercase().cmp(&b.company.to_lowercase()),
            SortColumn::Location => a.location.to_lowercase().cmp(&b.location.to_lowercase()),
            SortColumn::Date => a.posted.cmp(&b.posted),
            SortColumn::Description => a.has_description().cmp(&b.has_description()),
        }
    }
}

fn description_label(listing: &Listing) -> &'static str {
    if listing.has_description() {
        "yes"
    } else {
        "no"
    }
}

struct RuleForm {
    scope: FieldScope,
    required: String,
    excluded: String,
}

impl RuleForm {
    fn from_rule(rule: &KeywordRule) -> Self {
        Self {
            scope: rule.scope,
            required: rule.required.to_string(),
            excluded: rule.excluded.to_string(),
        }
    }

    fn to_rule(&self) -> KeywordRule {
        KeywordRule::new(
            self.scope,
            KeywordList::parse(&self.required),
            KeywordList::parse(&self.excluded),
        )
    }
}

struct SearchForm {
    keywords: String,
    n_days: u32,
    location: String,
    geo_id: String,
    on_site: bool,
    remote: bool,
    hybrid: bool,
    max_jobs: String,
    fetch_descriptions: bool,
}

impl SearchForm {
    fn from_query(query: &SearchQuery, fetch_descriptions: bool) -> Self {
        Self {
            keywords: query.keywords.clone(),
            n_days: query.n_days,
            location: query.location.clone(),
            geo_id: query.geo_id.clone(),
            on_site: query.work_locations.contains(&WorkLocation::OnSite),
            remote: query.work_locations.contains(&WorkLocation::Remote),
            hybrid: query.work_locations.contains(&WorkLocation::Hybrid),
            max_jobs: query.max_jobs.map(|n| n.to_string()).unwrap_or_default(),
            fetch_descriptions,
        }
    }

    fn to_query(&self) -> Result<SearchQuery, String> {
        if self.keywords.trim().is_empty() {
            return Err("Please enter search keywords".to_string());
        }
        let mut work_locations = Vec::new();
        if self.hybrid {
            work_locations.push(WorkLocation::Hybrid);
        }
        if self.remote {
            work_locations.push(WorkLocation::Remote);
        }
        if self.on_site {
            work_locations.push(WorkLocation::OnSite);
        }
        if work_locations.is_empty() {
            return Err("Please select at least one work location".to_string());
        }
        let max_jobs = match self.max_jobs.trim() {
            "" => None,
            text => Some(text.parse::<usize>().map_err(|_| format!("Invalid number of jobs: {}", text))?),
        };
        Ok(SearchQuery {
            keywords: self.keywords.trim().to_string(),
            n_days: self.n_days,
            location: self.location.trim().to_string(),
            geo_id: self.geo_id.trim().to_string(),
            work_locations,
            max_jobs,
        })
    }
}

struct JobApp {
    config: Arc<Config>,
    form: SearchForm,
    rules: Vec<RuleForm>,
    keep_missing_descriptions: bool,
    mark_keywords: bool,
    delimiter: Delimiter,

    outcome: Option<SearchOutcome>,
    /// Table contents; exports write exactly these rows
    shown: ResultSet,
    selected: HashSet<String>,
    /// Column and ascending flag
    sort: Option<(SortColumn, bool)>,
    unsaved: bool,
    pending: Option<Guarded>,

    messages: Vec<String>,
    status: String,
    worker: Option<mpsc::Receiver<WorkerMessage>>,
    cancel: Option<CancelFlag>,
}

impl JobApp {
    fn new(
        config: Arc<Config>,
        query: &SearchQuery,
        rules: &FilterRules,
        outcome: Option<SearchOutcome>,
        messages: Vec<String>,
    ) -> Self {
        let shown = outcome.as_ref().map(|o| o.results.clone()).unwrap_or_default();
        let mut messages = messages;
        if let Some(outcome) = &outcome {
            messages.extend(outcome.warnings.iter().map(|w| format!("warning: {}", w)));
        }
        let status = match &outcome {
            Some(o) => format!("{} of {} job(s) passed the filters", o.results.len(), o.scraped.len()),
            None => "Idle".to_string(),
        };

        Self {
            form: SearchForm::from_query(query, config.search.fetch_descriptions),
            rules: rules.rules.iter().map(RuleForm::from_rule).collect(),
            keep_missing_descriptions: rules.keep_missing_descriptions,
            mark_keywords: config.output.mark_keywords,
            delimiter: config.output.delimiter,
            config,
            outcome,
            unsaved: !shown.is_empty(),
            shown,
            selected: HashSet::new(),
            sort: None,
            pending: None,
            messages,
            status,
            worker: None,
            cancel: None,
        }
    }

    fn running(&self) -> bool {
        self.worker.is_some()
    }

    fn filter_rules(&self) -> FilterRules {
        FilterRules {
            rules: self.rules.iter().map(RuleForm::to_rule).collect(),
            keep_missing_descriptions: self.keep_missing_descriptions,
        }
    }

    /// False, with a confirmation pending, while results are unsaved
    fn guard(&mut self, action: Guarded) -> bool {
        if self.unsaved {
            self.pending = Some(action);
            return false;
        }
        true
    }

    fn spawn<F>(&mut self, ctx: &egui::Context, status: &str, job: F)
    where
        F: FnOnce(Arc<Config>) -> WorkerMessage + Send + 'static,
    {
        let (tx, rx) = mpsc::channel();
        let config = self.config.clone();
        let ctx = ctx.clone();
        thread::spawn(move || {
            let message = job(config);
            let _ = tx.send(message);
            ctx.request_repaint();
        });
        self.worker = Some(rx);
        self.status = status.to_string();
    }

    fn poll_worker(&mut self, ctx: &egui::Context) {
        let Some(rx) = &self.worker else {
            return;
        };
        match rx.try_recv() {
            Ok(message) => {
                self.worker = None;
                self.handle(message);
            }
            Err(mpsc::TryRecvError::Empty) => ctx.request_repaint_after(Duration::from_millis(100)),
            Err(mpsc::TryRecvError::Disconnected) => {
                self.worker = None;
                self.cancel = None;
                self.status = "Worker stopped unexpectedly".to_string();
            }
        }
    }

    fn handle(&mut self, message: WorkerMessage) {
        self.cancel = None;
        match message {
            WorkerMessage::Tested(Ok(())) => self.status = "Testing successful".to_string(),
            WorkerMessage::Tested(Err(e)) => self.status = format!("Error during testing of session: {}", e),
            WorkerMessage::Counted(Ok(Some(n))) => self.status = format!("Number of jobs: {}", n),
            WorkerMessage::Counted(Ok(None)) => self.status = "The search page did not show a job count".to_string(),
            WorkerMessage::Counted(Err(e)) => self.status = format!("Could not count jobs: {}", e),
            WorkerMessage::Searched(Ok(outcome)) => {
                self.messages = outcome.warnings.iter().map(|w| format!("warning: {}", w)).collect();
                self.status = if outcome.scraped.is_empty() {
                    "No jobs available with current settings".to_string()
                } else {
                    format!("{} of {} job(s) passed the filters", outcome.results.len(), outcome.scraped.len())
                };
                self.set_shown(outcome.results.clone());
                self.outcome = Some(outcome);
            }
            WorkerMessage::Searched(Err(e)) => self.status = format!("Fetching jobs failed: {}", e),
        }
    }

    /// Replace the table contents, keeping the chosen sort order
    fn set_shown(&mut self, shown: ResultSet) {
        self.shown = shown;
        self.selected.clear();
        self.unsaved = !self.shown.is_empty();
        self.apply_sort();
    }

    fn start_search(&mut self, ctx: &egui::Context) {
        if !self.guard(Guarded::Fetch) {
            return;
        }
        let query = match self.form.to_query() {
            Ok(query) => query,
            Err(e) => {
                self.status = e;
                return;
            }
        };
        let rules = self.filter_rules();
        let fetch_descriptions = self.form.fetch_descriptions;
        let cancel = CancelFlag::default();
        self.cancel = Some(cancel.clone());
        self.spawn(ctx, "Fetching jobs...", move |config| {
            let result = with_source(config, cancel.clone(), |scraper| async move {
                run_search_cancellable(&scraper, &query, &rules, fetch_descriptions, &cancel).await
            });
            WorkerMessage::Searched(result.map_err(|e| format!("{:#}", e)))
        });
    }

    fn start_count(&mut self, ctx: &egui::Context) {
        let query = match self.form.to_query() {
            Ok(query) => query,
            Err(e) => {
                self.status = e;
                return;
            }
        };
        self.spawn(ctx, "Counting jobs...", move |config| {
            let result = with_source(config, CancelFlag::default(), |scraper| async move {
                scraper.count_jobs(&query).await
            });
            WorkerMessage::Counted(result.map_err(|e| format!("{:#}", e)))
        });
    }

    fn start_test(&mut self, ctx: &egui::Context) {
        self.spawn(ctx, "Testing session...", |config| {
            let result = with_source(config, CancelFlag::default(), |scraper| async move {
                scraper.test_connection().await
            });
            WorkerMessage::Tested(result.map_err(|e| format!("{:#}", e)))
        });
    }

    /// Ask the running search to stop; it returns what it has so far
    fn stop(&mut self) {
        if let Some(cancel) = &self.cancel {
            cancel.cancel();
            self.status = "Stopping, waiting for the current request...".to_string();
        }
    }

    fn apply_filters(&mut self) {
        let rules = self.filter_rules();
        if let Some(outcome) = &self.outcome {
            let filtered = outcome.refilter(&rules);
            self.status = format!("{} of {} job(s) passed the filters", filtered.len(), outcome.scraped.len());
            self.set_shown(filtered);
        }
    }

    fn reset_filters(&mut self) {
        if let Some(outcome) = &self.outcome {
            let all = outcome.scraped.clone();
            self.status = format!("Showing all {} scraped job(s)", all.len());
            self.set_shown(all);
        }
    }

    fn toggle_selected(&mut self, url: &str) {
        if !self.selected.remove(url) {
            self.selected.insert(url.to_string());
        }
    }

    /// Drop the selected rows from the table, and so from every export
    fn remove_selected(&mut self) -> usize {
        let selected = std::mem::take(&mut self.selected);
        let removed = self.shown.retain(|listing| !selected.contains(&listing.url));
        if removed > 0 {
            self.unsaved = true;
            self.status = format!("Removed {} row(s), {} left", removed, self.shown.len());
        }
        removed
    }

    /// Sort by `column`, flipping the direction when it is already the sort column
    fn sort_by(&mut self, column: SortColumn) {
        let ascending = match self.sort {
            Some((current, ascending)) if current == column => !ascending,
            _ => true,
        };
        self.sort = Some((column, ascending));
        self.apply_sort();
    }

    fn apply_sort(&mut self) {
        if let Some((column, ascending)) = self.sort {
            self.shown.sort_by(|a, b| {
                let order = column.compare(a, b);
                if ascending {
                    order
                } else {
                    order.reverse()
                }
            });
        }
    }

    fn export_path(&self, ext: &str) -> Option<PathBuf> {
        let outcome = self.outcome.as_ref()?;
        Some(resolve_out_path(None, &self.config.output.folder, &outcome.query, ext))
    }

    fn export(&mut self, kind: ExportKind) {
        let ext = match kind {
            ExportKind::Delimited => self.delimiter.ext(),
            ExportKind::Html => "html",
            ExportKind::Json => "json",
        };
        let Some(path) = self.export_path(ext) else {
            self.status = "Nothing to save yet".to_string();
            return;
        };
        let marks = self.filter_rules().description_keywords();
        let result = match kind {
            ExportKind::Delimited => save_delimited(&path, &self.shown, self.delimiter),
            ExportKind::Html => save_html(&path, &self.shown, self.mark_keywords.then_some(&marks)),
            ExportKind::Json => save_json(&path, &self.shown),
        };
        self.status = match result {
            Ok(()) => {
                self.unsaved = false;
                format!("Saved {} job(s) to {}", self.shown.len(), path.display())
            }
            Err(e) => format!("Saving failed: {}", e),
        };
    }

    fn draw_form(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let idle = !self.running();

        ui.heading("Settings");
        egui::Grid::new("settings").num_columns(2).show(ui, |ui| {
            ui.label("Keywords");
            ui.text_edit_singleline(&mut self.form.keywords);
            ui.end_row();
            ui.label("Past days");
            ui.add(egui::DragValue::new(&mut self.form.n_days).range(1..=30));
            ui.end_row();
            ui.label("Location");
            ui.text_edit_singleline(&mut self.form.location);
            ui.end_row();
            ui.label("Geo ID");
            ui.text_edit_singleline(&mut self.form.geo_id);
            ui.end_row();
            ui.label("Max jobs");
            ui.text_edit_singleline(&mut self.form.max_jobs);
            ui.end_row();
        });
        ui.horizontal(|ui| {
            ui.checkbox(&mut self.form.on_site, "On-site");
            ui.checkbox(&mut self.form.remote, "Remote");
            ui.checkbox(&mut self.form.hybrid, "Hybrid");
        });
        ui.checkbox(&mut self.form.fetch_descriptions, "Fetch job descriptions");

        ui.separator();
        ui.heading("Filters");
        ui.label("Keywords must be separated by a `,`");
        let mut remove = None;
        for (i, rule) in self.rules.iter_mut().enumerate() {
            ui.group(|ui| {
                ui.horizontal(|ui| {
                    egui::ComboBox::from_id_salt(("scope", i))
                        .selected_text(rule.scope.key())
                        .show_ui(ui, |ui| {
                            for scope in FieldScope::all() {
                                ui.selectable_value(&mut rule.scope, scope, scope.key());
                            }
                        });
                    if ui.small_button("Remove").clicked() {
                        remove = Some(i);
                    }
                });
                ui.label("Required (at least one)");
                ui.text_edit_multiline(&mut rule.required);
                ui.label("Excluded (none)");
                ui.text_edit_multiline(&mut rule.excluded);
            });
        }
        if let Some(i) = remove {
            self.rules.remove(i);
        }
        if ui.button("Add rule").clicked() {
            self.rules.push(RuleForm {
                scope: FieldScope::Title,
                required: String::new(),
                excluded: String::new(),
            });
        }
        ui.checkbox(&mut self.keep_missing_descriptions, "Keep jobs without description");
        ui.checkbox(&mut self.mark_keywords, "Mark description keywords");
        ui.horizontal(|ui| {
            if ui.add_enabled(self.outcome.is_some(), egui::Button::new("Apply filters")).clicked() {
                self.apply_filters();
            }
            if ui.add_enabled(self.outcome.is_some(), egui::Button::new("Reset filters")).clicked() {
                self.reset_filters();
            }
        });

        ui.separator();
        ui.heading("Actions");
        ui.horizontal(|ui| {
            if ui.add_enabled(idle, egui::Button::new("Test session")).clicked() {
                self.start_test(ctx);
            }
            if ui.add_enabled(idle, egui::Button::new("Get number of jobs")).clicked() {
                self.start_count(ctx);
            }
            if ui.add_enabled(idle, egui::Button::new("Fetch jobs")).clicked() {
                self.start_search(ctx);
            }
            if ui.add_enabled(self.cancel.is_some(), egui::Button::new("Stop")).clicked() {
                self.stop();
            }
        });
    }

    fn draw_export_bar(&mut self, ui: &mut egui::Ui) {
        let has_results = self.outcome.is_some();
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!self.selected.is_empty(), egui::Button::new("Remove selected"))
                .on_hover_text("Or press Delete")
                .clicked()
            {
                self.remove_selected();
            }
            ui.separator();
            ui.label(format!("Folder: {}", self.config.output.folder.display()));
            ui.radio_value(&mut self.delimiter, Delimiter::Comma, "CSV");
            ui.radio_value(&mut self.delimiter, Delimiter::Tab, "TSV");
            if ui.add_enabled(has_results, egui::Button::new("Save table")).clicked() {
                self.export(ExportKind::Delimited);
            }
            if ui.add_enabled(has_results, egui::Button::new("Save HTML")).clicked() {
                self.export(ExportKind::Html);
            }
            if ui.add_enabled(has_results, egui::Button::new("Save JSON")).clicked() {
                self.export(ExportKind::Json);
            }
        });
    }

    fn draw_results(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(self.status.as_str());
            if !self.selected.is_empty() {
                ui.label(format!("({} selected)", self.selected.len()));
            }
        });
        if !self.messages.is_empty() {
            egui::CollapsingHeader::new(format!("Messages ({})", self.messages.len()))
                .id_salt("messages")
                .show(ui, |ui| {
                    for message in &self.messages {
                        ui.label(message.as_str());
                    }
                });
        }
        ui.separator();

        let mut sort_clicked = None;
        let mut row_clicked = None;
        let sort = self.sort;
        let selected = &self.selected;

        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .sense(egui::Sense::click())
            .column(Column::initial(320.0).at_least(80.0).clip(true))
            .column(Column::initial(180.0).clip(true))
            .column(Column::initial(120.0).clip(true))
            .column(Column::initial(90.0))
            .column(Column::initial(90.0))
            .column(Column::remainder())
            .header(20.0, |mut header| {
                for column in SortColumn::ALL {
                    header.col(|ui| {
                        let arrow = match sort {
                            Some((current, true)) if current == column => " ^",
                            Some((current, false)) if current == column => " v",
                            _ => "",
                        };
                        if ui.button(format!("{}{}", column.label(), arrow)).clicked() {
                            sort_clicked = Some(column);
                        }
                    });
                }
                header.col(|ui| {
                    ui.strong("Link");
                });
            })
            .body(|mut body| {
                for listing in self.shown.iter() {
                    body.row(18.0, |mut row| {
                        row.set_selected(selected.contains(&listing.url));
                        row.col(|ui| {
                            ui.label(listing.title.as_str());
                        });
                        row.col(|ui| {
                            ui.label(listing.company.as_str());
                        });
                        row.col(|ui| {
                            ui.label(listing.location.as_str());
                        });
                        row.col(|ui| {
                            ui.label(listing.posted_display());
                        });
                        row.col(|ui| {
                            ui.label(description_label(listing));
                        });
                        row.col(|ui| {
                            ui.hyperlink_to("open", &listing.url);
                        });
                        if row.response().clicked() {
                            row_clicked = Some(listing.url.clone());
                        }
                    });
                }
            });

        if let Some(column) = sort_clicked {
            self.sort_by(column);
        }
        if let Some(url) = row_clicked {
            self.toggle_selected(&url);
        }
    }

    fn draw_confirm(&mut self, ctx: &egui::Context) {
        let Some(action) = self.pending else {
            return;
        };
        let mut answer = None;
        egui::Window::new("Results not saved")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("The current results have not been saved. Continue anyway?");
                ui.horizontal(|ui| {
                    if ui.button("Continue").clicked() {
                        answer = Some(true);
                    }
                    if ui.button("Cancel").clicked() {
                        answer = Some(false);
                    }
                });
            });

        match answer {
            Some(true) => {
                self.pending = None;
                self.unsaved = false;
                match action {
                    Guarded::Fetch => self.start_search(ctx),
                    Guarded::Close => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
                }
            }
            Some(false) => self.pending = None,
            None => {}
        }
    }
}

#[derive(Clone, Copy)]
enum ExportKind {
    Delimited,
    Html,
    Json,
}

impl eframe::App for JobApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_worker(ctx);

        if ctx.input(|i| i.viewport().close_requested()) && !self.guard(Guarded::Close) {
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
        }

        let typing = ctx.memory(|m| m.focused().is_some());
        if !typing && !self.selected.is_empty() && ctx.input(|i| i.key_pressed(egui::Key::Delete)) {
            self.remove_selected();
        }

        egui::SidePanel::left("form")
            .resizable(true)
            .default_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.draw_form(ui, ctx);
                });
            });

        egui::TopBottomPanel::bottom("export").show(ctx, |ui| {
            self.draw_export_bar(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_results(ui);
        });

        self.draw_confirm(ctx);
    }
}
