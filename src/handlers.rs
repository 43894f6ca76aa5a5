use crate::dates::parse_date_key;
use crate::errors::AppError;
use crate::goal::{calculate_progress, describe_goal, toggle_completion};
use crate::grid::build_grid;
use crate::models::{
    Habit, HabitForm, HabitSettings, HabitView, SettingsInput, ToggleRequest, ToggleResponse,
};
use crate::state::AppState;
use crate::storage::persist_habits;
use crate::ui::render_index;
use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    Form, Json,
};
use chrono::NaiveDate;
use tracing::{debug, info};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let today = state.clock.today();
    let habits = state.habits.lock().await;
    let views: Vec<HabitView> = habits
        .iter()
        .map(|habit| habit_view(habit, today, state.grid_days))
        .collect();
    Html(render_index(today, &views))
}

pub async fn list_habits(State(state): State<AppState>) -> Json<Vec<HabitView>> {
    let today = state.clock.today();
    let habits = state.habits.lock().await;
    Json(
        habits
            .iter()
            .map(|habit| habit_view(habit, today, state.grid_days))
            .collect(),
    )
}

pub async fn get_habit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<HabitView>, AppError> {
    let today = state.clock.today();
    let habits = state.habits.lock().await;
    let habit = habits
        .iter()
        .find(|habit| habit.id == id)
        .ok_or_else(|| AppError::unknown_habit(&id))?;
    Ok(Json(habit_view(habit, today, state.grid_days)))
}

pub async fn create_habit(
    State(state): State<AppState>,
    Json(payload): Json<SettingsInput>,
) -> Result<Json<HabitView>, AppError> {
    let view = apply_create(&state, payload).await?;
    Ok(Json(view))
}

pub async fn create_habit_form(
    State(state): State<AppState>,
    Form(form): Form<HabitForm>,
) -> Result<Redirect, AppError> {
    apply_create(&state, form.into_input()).await?;
    Ok(Redirect::to("/"))
}

pub async fn toggle(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ToggleRequest>,
) -> Result<Json<ToggleResponse>, AppError> {
    let response = apply_toggle(&state, &id, &payload.date).await?;
    Ok(Json(response))
}

pub async fn toggle_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(payload): Form<ToggleRequest>,
) -> Result<Redirect, AppError> {
    apply_toggle(&state, &id, &payload.date).await?;
    Ok(Redirect::to("/"))
}

async fn apply_create(state: &AppState, input: SettingsInput) -> Result<HabitView, AppError> {
    let today = state.clock.today();
    let habit = Habit::new(HabitSettings::from_input(input));
    let mut habits = state.habits.lock().await;
    habits.push(habit);

    if let Err(err) = persist_habits(&state.store, &habits).await {
        habits.pop();
        return Err(err);
    }

    let habit = &habits[habits.len() - 1];
    info!(id = %habit.id, goal = habit.settings.goal.as_str(), "created habit");
    Ok(habit_view(habit, today, state.grid_days))
}

async fn apply_toggle(state: &AppState, id: &str, raw_date: &str) -> Result<ToggleResponse, AppError> {
    let today = state.clock.today();
    let date = parse_date_key(raw_date)
        .ok_or_else(|| AppError::invalid_date(raw_date))?;
    if date > today {
        return Err(AppError::future_date(date));
    }

    let mut habits = state.habits.lock().await;
    let index = habits
        .iter()
        .position(|habit| habit.id == id)
        .ok_or_else(|| AppError::unknown_habit(id))?;

    // The in-memory habit only changes once the toggled copy is on disk.
    let mut candidate = habits[index].clone();
    let outcome = toggle_completion(&mut candidate, date);
    match outcome {
        Some(done) => {
            let previous = std::mem::replace(&mut habits[index], candidate);
            if let Err(err) = persist_habits(&state.store, &habits).await {
                habits[index] = previous;
                return Err(err);
            }
            info!(id, %date, done, "toggled completion");
        }
        None => debug!(id, %date, "ignored toggle on non-target day"),
    }

    let habit = &habits[index];
    Ok(ToggleResponse {
        changed: outcome.is_some(),
        done: habit.completions.is_done(date),
        view: habit_view(habit, today, state.grid_days),
    })
}

fn habit_view(habit: &Habit, today: NaiveDate, grid_days: usize) -> HabitView {
    let goal = habit.settings.goal();
    HabitView {
        habit: habit.clone(),
        description: describe_goal(&goal),
        summary: calculate_progress(&goal, &habit.completions, today).into(),
        grid: build_grid(&goal, &habit.completions, today, grid_days),
    }
}
