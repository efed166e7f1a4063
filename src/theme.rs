use crate::layout::BodyPart;

#[derive(Debug, Clone)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub text_color: String,
    pub background: String,
    /// Accent colours handed to the left and right figure.
    pub accent_colors: [String; 2],
    pub arm_color: String,
    pub neck_color: String,
    pub shoulder_color: String,
    pub torso_color: String,
    pub head_fill: String,
    pub head_stroke: String,
    pub hover_fill: String,
    pub guide_color: String,
    pub caption_font_family: String,
    pub caption_font_size: f32,
    pub guide_font_size: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::plotly()
    }
}

impl Theme {
    /// Plotly-style palette: crimson and dark blue figures on white.
    pub fn plotly() -> Self {
        Self {
            font_family: "\"Open Sans\", verdana, arial, sans-serif".to_string(),
            font_size: 12.0,
            text_color: "#444444".to_string(),
            background: "#FFFFFF".to_string(),
            accent_colors: ["crimson".to_string(), "darkblue".to_string()],
            arm_color: "blue".to_string(),
            neck_color: "green".to_string(),
            shoulder_color: "purple".to_string(),
            torso_color: "orange".to_string(),
            head_fill: "red".to_string(),
            head_stroke: "black".to_string(),
            hover_fill: "rgba(0,0,255,0.15)".to_string(),
            guide_color: "gray".to_string(),
            caption_font_family: "Arial Black".to_string(),
            caption_font_size: 17.0,
            guide_font_size: 13.0,
        }
    }

    pub fn modern() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 13.0,
            text_color: "#1C2430".to_string(),
            background: "#FFFFFF".to_string(),
            accent_colors: ["#E5484D".to_string(), "#3E63DD".to_string()],
            arm_color: "#0091FF".to_string(),
            neck_color: "#30A46C".to_string(),
            shoulder_color: "#8E4EC6".to_string(),
            torso_color: "#F76B15".to_string(),
            head_fill: "#E5484D".to_string(),
            head_stroke: "#1C2430".to_string(),
            hover_fill: "rgba(62,99,221,0.15)".to_string(),
            guide_color: "#7A8AA6".to_string(),
            caption_font_family: "Inter, Segoe UI, system-ui, sans-serif".to_string(),
            caption_font_size: 17.0,
            guide_font_size: 13.0,
        }
    }

    /// Stroke colour of a bone; legs take the figure's accent colour.
    pub fn bone_color<'a>(&'a self, part: BodyPart, accent: &'a str) -> &'a str {
        match part {
            BodyPart::Leg => accent,
            BodyPart::Arm => &self.arm_color,
            BodyPart::Neck => &self.neck_color,
            BodyPart::Shoulders => &self.shoulder_color,
            BodyPart::Torso => &self.torso_color,
        }
    }
}
