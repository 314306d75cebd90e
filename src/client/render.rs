use crate::{
    client::{
        dashboard::{DashboardStats, comment_preview},
        form::{FeedbackForm, Field},
        list::FeedbackList,
        notice::{Notice, NoticeKind},
    },
    models::FeedbackRecord,
};

const BAR_WIDTH: usize = 20;

/// Five star slots, filled up to `rating`.
pub fn stars(rating: i32) -> String {
    (1..=5)
        .map(|i| if i <= rating { '★' } else { '☆' })
        .collect()
}

pub fn render_notice(notice: &Notice) -> String {
    match notice.kind {
        NoticeKind::Success => format!("[ok] {}", notice.text),
        NoticeKind::Error => format!("[error] {}", notice.text),
    }
}

fn bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

pub fn render_dashboard(stats: &DashboardStats) -> String {
    let average = if stats.total > 0 {
        format!("{:.1}", stats.average_rating)
    } else {
        "0".to_string()
    };
    let highest = match stats.highest_rating() {
        Some(rating) => format!("{} ★", rating),
        None => "N/A".to_string(),
    };

    let mut lines = vec![
        "Dashboard Overview".to_string(),
        format!("  Total Feedback: {}", stats.total),
        format!("  Average Rating: {}/5", average),
        format!("  Highest Rating: {}", highest),
        String::new(),
        "Rating Distribution".to_string(),
    ];

    lines.extend(stats.rating_distribution.iter().rev().map(|(rating, count)| {
        format!(
            "  {} ★ {} {}",
            rating,
            bar(stats.share_percent(rating)),
            count
        )
    }));

    lines.push(String::new());
    lines.push("Recent Feedback".to_string());
    if stats.recent_feedback.is_empty() {
        lines.push("  No feedback available yet.".to_string());
    }
    for feedback in &stats.recent_feedback {
        lines.push(format!(
            "  {}  {}\n  {}\n  {}\n",
            feedback.student_name,
            stars(feedback.rating),
            feedback.course_code,
            comment_preview(&feedback.comments)
        ));
    }

    lines.join("\n")
}

pub fn render_card(feedback: &FeedbackRecord) -> String {
    format!(
        "#{} {} [{}]\n  {} {}/5\n  {}\n  {}\n",
        feedback.id,
        feedback.student_name,
        feedback.course_code,
        stars(feedback.rating),
        feedback.rating,
        feedback.comments,
        feedback.created_at.format("%b %-d, %Y, %I:%M %p")
    )
}

/// Expired notices are left out.
pub fn render_list(list: &FeedbackList) -> String {
    let mut lines = vec!["All Course Feedback".to_string()];

    if let Some(notice) = list.active_notice() {
        lines.push(render_notice(notice));
    }
    if let Some(error) = &list.error {
        lines.push(render_notice(&Notice::error(error.clone())));
    }

    let courses = list.course_options();
    if !courses.is_empty() {
        lines.push(format!("Courses: {}", courses.join(", ")));
    }
    lines.push(format!("{}\n", list.summary()));

    match list.empty_message() {
        Some(message) => lines.push(message.to_string()),
        None => lines.extend(list.visible().into_iter().map(render_card)),
    }

    lines.join("\n")
}

pub fn render_form_errors(form: &FeedbackForm) -> String {
    [
        Field::StudentName,
        Field::CourseCode,
        Field::Comments,
        Field::Rating,
    ]
    .into_iter()
    .filter_map(|field| {
        form.errors()
            .get(field)
            .map(|msg| format!("  {}: {}\n", field, msg))
    })
    .collect()
}
