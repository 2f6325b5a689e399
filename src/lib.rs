pub mod ai;
pub mod api;
pub mod commands;
pub mod db;
pub mod error;
pub mod models;
pub mod state;

use state::AppState;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize the database
    let conn = db::migrations::init_db().expect("Failed to initialize database");

    tauri::Builder::default()
        .plugin(tauri_plugin_fs::init())
        .plugin(tauri_plugin_dialog::init())
        .setup(|app| {
            if cfg!(debug_assertions) {
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Debug)
                        .build(),
                )?;
            } else {
                // Also log in release mode but at info level
                app.handle().plugin(
                    tauri_plugin_log::Builder::default()
                        .level(log::LevelFilter::Info)
                        .build(),
                )?;
            }
            Ok(())
        })
        .manage(AppState::new(conn))
        .invoke_handler(tauri::generate_handler![
            // Auth commands
            commands::auth_commands::register,
            commands::auth_commands::login,
            commands::auth_commands::logout,
            commands::auth_commands::current_user,
            // Question commands
            commands::question_commands::list_questions,
            commands::question_commands::get_question,
            commands::question_commands::create_question,
            commands::question_commands::update_question,
            commands::question_commands::delete_question,
            // Subject commands
            commands::subject_commands::list_subjects,
            commands::subject_commands::create_subject,
            commands::subject_commands::update_subject,
            commands::subject_commands::delete_subject,
            // Review commands
            commands::review_commands::get_review_stats,
            commands::review_commands::list_review_questions,
            commands::review_commands::submit_review,
            // Exam commands
            commands::exam_commands::generate_exam,
            commands::exam_commands::submit_exam,
            commands::exam_commands::save_wrong_question,
            // Dashboard commands
            commands::dashboard_commands::get_dashboard_stats,
            commands::dashboard_commands::get_subject_distribution,
            commands::dashboard_commands::get_review_trend,
            commands::dashboard_commands::get_mastery_status,
            // Profile commands
            commands::profile_commands::get_profile,
            commands::profile_commands::update_profile,
            commands::profile_commands::change_password,
            commands::profile_commands::upload_avatar,
            commands::profile_commands::upload_file,
            // AI commands
            commands::ai_commands::send_chat_message,
            commands::ai_commands::cancel_chat_message,
            commands::ai_commands::get_chat_transcript,
            commands::ai_commands::get_chat_history,
            commands::ai_commands::clear_chat_history,
            commands::ai_commands::get_chat_settings,
            // Settings commands
            commands::settings_commands::get_settings,
            commands::settings_commands::update_settings,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
