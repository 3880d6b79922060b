// Interview LLM prompt templates.
// All prompts for the interview module are defined here.

pub const QUESTIONS_MAX_TOKENS: u32 = 1500;
pub const SCORING_MAX_TOKENS: u32 = 800;
pub const SUMMARY_MAX_TOKENS: u32 = 500;

pub const QUESTIONS_SYSTEM: &str = "\
You are an AI assistant that helps conduct technical interviews for full-stack developers. \
Provide clear, concise, and helpful responses.";

pub const QUESTIONS_PROMPT: &str = r#"Generate 6 technical interview questions for a full-stack developer position (React/Node.js).
Create 2 easy, 2 medium, and 2 hard questions.
Each question should be practical and relevant to real-world development.
Return the questions in JSON format with the following structure:
[
  {
    "id": "1",
    "text": "Question text here",
    "difficulty": "easy|medium|hard",
    "timeLimit": 20|60|120,
    "category": "Frontend|Backend|System Design|Database|DevOps"
  }
]"#;

pub const SCORING_SYSTEM: &str = "\
You are an expert technical interviewer. \
Evaluate answers objectively and provide constructive feedback.";

pub const SCORING_PROMPT_TEMPLATE: &str = r#"You are an expert technical interviewer evaluating a candidate's answer for a full-stack developer position.

QUESTION DETAILS:
Question: {question_text}
Difficulty Level: {difficulty}
Category: {category}

CANDIDATE'S ANSWER:
{answer}

EVALUATION CRITERIA:
Please evaluate this answer based on the following criteria (each worth 20 points, total 100):

1. TECHNICAL ACCURACY (20 points):
   - Correctness of technical concepts
   - Understanding of the technology
   - Accuracy of implementation details

2. PROBLEM-SOLVING APPROACH (20 points):
   - Logical thinking process
   - Step-by-step reasoning
   - Consideration of edge cases
   - Alternative solutions mentioned

3. COMMUNICATION CLARITY (20 points):
   - Clear explanation of concepts
   - Well-structured response
   - Use of appropriate technical terminology
   - Ability to explain complex ideas simply

4. RELEVANCE TO QUESTION (20 points):
   - Directly addresses the question asked
   - Stays on topic
   - Provides relevant examples
   - Shows understanding of the context

5. DEPTH OF KNOWLEDGE (20 points):
   - Demonstrates deep understanding
   - Shows practical experience
   - Mentions best practices
   - Shows awareness of industry standards

SCORING GUIDELINES:
- 90-100: Exceptional - Demonstrates mastery, provides excellent examples, shows deep understanding
- 80-89: Good - Solid understanding, good examples, minor gaps in knowledge
- 70-79: Satisfactory - Basic understanding, some good points, room for improvement
- 60-69: Below Average - Limited understanding, some correct points, significant gaps
- 40-59: Poor - Minimal understanding, many incorrect points, needs significant improvement
- 0-39: Very Poor - Little to no understanding, mostly incorrect, requires extensive learning

Return your evaluation in this exact JSON format:
{
    "score": 85,
    "feedback": "Detailed feedback explaining the score and areas for improvement",
    "technical_accuracy": 18,
    "problem_solving": 17,
    "communication": 16,
    "relevance": 19,
    "depth_of_knowledge": 15,
    "strengths": ["List specific strengths shown in the answer"],
    "areas_for_improvement": ["List specific areas that need improvement"],
    "suggestions": ["Provide specific suggestions for improvement"]
}"#;

pub const SUMMARY_SYSTEM: &str = "\
You are an expert HR professional. \
Generate professional, objective candidate summaries.";

pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"Generate a professional summary for this candidate based on their interview performance.

Candidate: {name}
Email: {email}
Questions answered: {answered}/{total}
Overall score: {final_score}%

Interview responses:
{responses}

Provide a concise, professional summary (2-3 sentences) highlighting:
- Technical strengths
- Areas for improvement
- Overall assessment"#;
