use super::state::{SessionAction, SessionState};

/// Applies one action to the session state.
///
/// Login replaces the whole record, so nothing from a previous session (or a
/// previous selection) survives. Selection actions touch exactly one field and
/// are not checked against the user's classes or subjects.
pub fn reduce(state: &SessionState, action: SessionAction) -> SessionState {
    match action {
        SessionAction::SetLoginDetails(payload) => SessionState {
            is_logged_in: true,
            access: payload.access,
            refresh: payload.refresh,
            role: Some(payload.role),
            id: payload.id,
            username: payload.username,
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            phone: payload.phone,
            address: payload.address,
            date_of_birth: payload.date_of_birth,
            gender: payload.gender,
            date_of_joining: payload.date_of_joining,
            classes: payload.classes,
            subjects: payload.subjects,
            ..SessionState::default()
        },
        SessionAction::LogoutUser => SessionState::default(),
        SessionAction::SetSelectedClass { class_name } => SessionState {
            selected_class: class_name,
            ..state.clone()
        },
        SessionAction::SetSelectedSubject { subject_id } => SessionState {
            selected_subject: subject_id,
            ..state.clone()
        },
        SessionAction::SetSelectedClassId { class_id } => SessionState {
            selected_class_id: class_id,
            ..state.clone()
        },
    }
}
