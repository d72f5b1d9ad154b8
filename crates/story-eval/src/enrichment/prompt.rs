use crate::evaluation::StoryPayload;

/// Editor prompt asking for a per-stage recap and five practical tips.
pub fn build_prompt(payload: &StoryPayload) -> String {
    let story = payload
        .stages
        .iter()
        .enumerate()
        .map(|(index, stage)| {
            format!(
                "[Babak {} {}] kata-wajib: {}\n{}",
                index + 1,
                stage.label,
                stage.words.join(", "),
                stage.text
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let prompt = format!(
        "Anda adalah editor sastra. Evaluasi cerita berikut secara singkat (maks 120 kata).\n\
         Tema: {}\n\
         Ceritakan per-babak secara 1–2 kalimat, lalu berikan 5 rekomendasi praktis (bullet).\n\
         Cerita:\n\
         {}",
        payload.theme, story
    );
    prompt.trim().to_string()
}
