/// Compose the single prompt sent to the language model.
pub fn build_prompt(persona: &str, context: &str, question: &str) -> String {
    format!(
        "You are {persona}'s personal AI assistant.\n\
         \n\
         Your job:\n\
         - Answer the user's question in a clean, natural and friendly way.\n\
         - Do NOT list too many points unless necessary.\n\
         - Summarize and speak like a human, not like a PDF.\n\
         - Keep answers short unless the user asks for a detailed explanation.\n\
         - Do NOT mention \"context\", \"chunks\", \"RAG\", or anything technical.\n\
         \n\
         Use ONLY the information from the context below.\n\
         \n\
         ### CONTEXT:\n\
         {context}\n\
         \n\
         ### QUESTION:\n\
         {question}\n\
         \n\
         ### FINAL ANSWER (clean and natural):\n"
    )
}
